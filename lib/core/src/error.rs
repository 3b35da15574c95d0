use thiserror::Error;

use crate::facility::FacilityId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid edge weight between {from} and {to}: distance must be positive")]
    InvalidWeight { from: String, to: String },

    #[error("Invalid facility id: {0}")]
    InvalidFacilityId(FacilityId),

    #[error("Facility already exists: {0}")]
    FacilityExists(FacilityId),

    #[error("Invalid capacity for facility {id}: available {available} exceeds total {total}")]
    InvalidCapacity {
        id: FacilityId,
        available: u64,
        total: u64,
    },

    #[error("Invalid temperature for facility {0}: must be a finite number")]
    InvalidTemperature(FacilityId),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
