//! # AgriLink Core
//!
//! Computational core of the AgriLink marketplace.
//!
//! This crate provides three independent engines over in-memory state:
//!
//! - [`Router`] - Dijkstra shortest paths over a static [`CityGraph`]
//! - [`Allocator`] - greedy, score-based storage selection from a [`FacilityRegistry`]
//! - [`OrderQueue`] - FIFO order admission with monotonic ids
//!
//! [`MarketCore`] bundles them into one service context.
//!
//! ## Example
//!
//! ```rust
//! use agrilink_core::{MarketConfig, MarketCore};
//!
//! let core = MarketCore::from_config(&MarketConfig::default()).unwrap();
//!
//! let route = core.shortest_path("Lahore", "Faisalabad").unwrap();
//! assert_eq!(route.distance, 180);
//! assert_eq!(route.estimate.to_string(), "2h 15m");
//!
//! let storage = core.allocate(500).unwrap();
//! assert_eq!(storage.name, "Karachi Agri Hub");
//!
//! let order_id = core.enqueue("buyer1", 1, 500);
//! assert_eq!(order_id, 1);
//! assert_eq!(core.queue_size(), 1);
//! ```

pub mod allocator;
pub mod config;
pub mod error;
pub mod facility;
pub mod graph;
pub mod market;
pub mod order;
pub mod router;

pub use allocator::{AllocationResult, Allocator};
pub use config::{LogFormat, LoggingConfig, MarketConfig};
pub use error::{Error, Result};
pub use facility::{FacilityId, FacilityRegistry, StorageFacility};
pub use graph::{CityGraph, Edge};
pub use market::{MarketCore, MarketStats};
pub use order::{Order, OrderId, OrderQueue, OrderStatus};
pub use router::{RoutePath, Router, TransitEstimate};
