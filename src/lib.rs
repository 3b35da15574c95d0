//! # AgriLink
//!
//! Routing, storage allocation and order admission for a small agricultural
//! marketplace.
//!
//! The surrounding marketplace (accounts, crop listings, HTTP) calls into
//! three engines that share nothing but the service context:
//!
//! - **Routing**: cheapest transit path between two cities, with an estimated
//!   travel time at 80 km/h
//! - **Storage allocation**: greedy pick of the facility with the most spare
//!   capacity closest to 4°C
//! - **Order admission**: FIFO queue with gap-free sequential ids
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! agrilink route Lahore Quetta
//! agrilink allocate 500 2000
//! agrilink --config market.json stats
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use agrilink::prelude::*;
//!
//! let graph = CityGraph::from_edges(vec![
//!     Edge::new("Lahore", "Multan", 342),
//!     Edge::new("Multan", "Karachi", 980),
//! ]).unwrap();
//! let registry = FacilityRegistry::from_facilities(vec![
//!     StorageFacility::new(1, "Lahore Cold Storage", "Lahore", 10_000, 4.0),
//! ]).unwrap();
//! let core = MarketCore::new(graph, registry);
//!
//! let route = core.shortest_path("Lahore", "Karachi").unwrap();
//! assert_eq!(route.path_string(), "Lahore -> Multan -> Karachi");
//! assert!(core.allocate(20_000).is_none());
//! ```

pub use agrilink_core::{
    AllocationResult, Allocator,
    CityGraph, Edge,
    FacilityId, FacilityRegistry, StorageFacility,
    MarketConfig, LoggingConfig, LogFormat,
    MarketCore, MarketStats,
    Order, OrderId, OrderQueue, OrderStatus,
    RoutePath, Router, TransitEstimate,
    Error, Result,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AllocationResult, Allocator,
        CityGraph, Edge,
        FacilityRegistry, StorageFacility,
        MarketConfig, MarketCore, MarketStats,
        Order, OrderQueue, OrderStatus,
        RoutePath, Router, TransitEstimate,
        Error, Result,
    };
}

/// Scoring and estimate helpers
pub mod scoring {
    pub use agrilink_core::allocator::{score, IDEAL_TEMPERATURE, TEMPERATURE_PENALTY};
    pub use agrilink_core::router::AVERAGE_SPEED_KMH;
}
