// Market configuration - network edges, facility registry, logging
use crate::facility::StorageFacility;
use crate::graph::{Edge, DEFAULT_NETWORK};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Startup configuration. Missing sections fall back to the built-in
/// network and sample facilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub network: Option<Vec<Edge>>,
    pub facilities: Option<Vec<StorageFacility>>,
    pub logging: LoggingConfig,
}

impl MarketConfig {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Shape checks that do not need a built registry
    pub fn validate(&self) -> Result<()> {
        if let Some(network) = &self.network {
            if network.is_empty() {
                return Err(Error::Config("network must contain at least one edge".to_string()));
            }
            if let Some(edge) = network.iter().find(|e| e.from.is_empty() || e.to.is_empty()) {
                return Err(Error::Config(format!(
                    "edge has an empty city name: {:?} - {:?}",
                    edge.from, edge.to
                )));
            }
        }
        Ok(())
    }

    /// Configured edges, or the built-in network
    pub fn edges(&self) -> Vec<Edge> {
        match &self.network {
            Some(network) => network.clone(),
            None => DEFAULT_NETWORK
                .iter()
                .map(|&(a, b, distance)| Edge::new(a, b, distance))
                .collect(),
        }
    }

    /// Configured facilities, or the sample registry
    pub fn facilities(&self) -> Vec<StorageFacility> {
        self.facilities.clone().unwrap_or_else(StorageFacility::samples)
    }
}
