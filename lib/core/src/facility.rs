use crate::{Error, Result};
use parking_lot::{RwLock, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub type FacilityId = u64;

/// A storage facility with capacity and temperature state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageFacility {
    pub id: FacilityId,
    pub name: String,
    pub location: String,
    pub total_capacity: u64,
    pub available_capacity: u64,
    /// Degrees Celsius
    pub temperature: f64,
}

impl StorageFacility {
    #[must_use]
    pub fn new(
        id: FacilityId,
        name: impl Into<String>,
        location: impl Into<String>,
        total_capacity: u64,
        temperature: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            total_capacity,
            available_capacity: total_capacity,
            temperature,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_available(mut self, available_capacity: u64) -> Self {
        self.available_capacity = available_capacity;
        self
    }

    /// Sample facilities used when no registry is configured
    pub fn samples() -> Vec<StorageFacility> {
        vec![
            StorageFacility::new(1, "Lahore Cold Storage", "Lahore", 10_000, 4.0)
                .with_available(8_000),
            StorageFacility::new(2, "Karachi Agri Hub", "Karachi", 15_000, 5.0)
                .with_available(12_000),
            StorageFacility::new(3, "Multan Storage Facility", "Multan", 8_000, 3.5)
                .with_available(7_000),
            StorageFacility::new(4, "Islamabad Cold Chain", "Islamabad", 12_000, 4.5)
                .with_available(10_000),
        ]
    }
}

/// Facility registry, iterated in ascending id order.
///
/// Capacities are unsigned and every decrement is checked against the
/// current available capacity, so `0 <= available <= total` always holds.
#[derive(Debug, Default)]
pub struct FacilityRegistry {
    facilities: RwLock<BTreeMap<FacilityId, StorageFacility>>,
}

impl FacilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_facilities<I>(facilities: I) -> Result<Self>
    where
        I: IntoIterator<Item = StorageFacility>,
    {
        let registry = Self::new();
        for facility in facilities {
            registry.register(facility)?;
        }
        Ok(registry)
    }

    pub fn register(&self, facility: StorageFacility) -> Result<()> {
        if facility.id == 0 {
            warn!(name = %facility.name, "rejected facility with id 0");
            return Err(Error::InvalidFacilityId(facility.id));
        }
        if !facility.temperature.is_finite() {
            warn!(id = facility.id, "rejected facility with non-finite temperature");
            return Err(Error::InvalidTemperature(facility.id));
        }
        if facility.available_capacity > facility.total_capacity {
            warn!(id = facility.id, "rejected facility with available > total");
            return Err(Error::InvalidCapacity {
                id: facility.id,
                available: facility.available_capacity,
                total: facility.total_capacity,
            });
        }

        let mut facilities = self.facilities.write();
        if facilities.contains_key(&facility.id) {
            warn!(id = facility.id, "rejected duplicate facility");
            return Err(Error::FacilityExists(facility.id));
        }
        debug!(id = facility.id, name = %facility.name, "facility registered");
        facilities.insert(facility.id, facility);
        Ok(())
    }

    pub fn list(&self) -> Vec<StorageFacility> {
        self.facilities.read().values().cloned().collect()
    }

    pub fn get(&self, id: FacilityId) -> Option<StorageFacility> {
        self.facilities.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.facilities.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.read().is_empty()
    }

    /// Sum of `(total_capacity, available_capacity)` over all facilities,
    /// saturating at `u64::MAX`
    pub fn totals(&self) -> (u64, u64) {
        self.facilities
            .read()
            .values()
            .fold((0u64, 0u64), |(total, available), f| {
                (
                    total.saturating_add(f.total_capacity),
                    available.saturating_add(f.available_capacity),
                )
            })
    }

    /// Exclusive access for a read-then-mutate critical section
    pub(crate) fn lock(&self) -> RwLockWriteGuard<'_, BTreeMap<FacilityId, StorageFacility>> {
        self.facilities.write()
    }
}
