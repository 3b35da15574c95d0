use crate::allocator::{AllocationResult, Allocator};
use crate::config::MarketConfig;
use crate::facility::FacilityRegistry;
use crate::graph::CityGraph;
use crate::order::{OrderId, OrderQueue};
use crate::router::{RoutePath, Router};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Aggregate view over all engines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    pub cities: usize,
    pub routes: usize,
    pub storage_centers: usize,
    pub total_storage_capacity: u64,
    pub available_storage: u64,
    pub pending_orders: usize,
}

/// Service context owning the network, facility registry and order queue.
///
/// The engines never call each other. Callers share one `MarketCore` behind
/// an `Arc`; allocation and admission lock internally, routing is lock-free.
#[derive(Debug)]
pub struct MarketCore {
    router: Router,
    allocator: Allocator,
    orders: OrderQueue,
}

impl MarketCore {
    pub fn new(graph: CityGraph, registry: FacilityRegistry) -> Self {
        Self {
            router: Router::new(Arc::new(graph)),
            allocator: Allocator::new(Arc::new(registry)),
            orders: OrderQueue::new(),
        }
    }

    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        config.validate()?;
        let graph = CityGraph::from_edges(config.edges())?;
        let registry = FacilityRegistry::from_facilities(config.facilities())?;
        info!(
            cities = graph.city_count(),
            routes = graph.edge_count(),
            facilities = registry.len(),
            "market core initialized"
        );
        Ok(Self::new(graph, registry))
    }

    #[inline]
    pub fn shortest_path(&self, start: &str, end: &str) -> Option<RoutePath> {
        self.router.shortest_path(start, end)
    }

    #[inline]
    pub fn allocate(&self, quantity: u64) -> Option<AllocationResult> {
        self.allocator.allocate(quantity)
    }

    #[inline]
    pub fn enqueue(&self, requester: impl Into<String>, crop_id: u64, quantity: u64) -> OrderId {
        self.orders.enqueue(requester, crop_id, quantity)
    }

    #[inline]
    pub fn queue_size(&self) -> usize {
        self.orders.size()
    }

    pub fn stats(&self) -> MarketStats {
        let graph = self.router.graph();
        let registry = self.allocator.registry();
        let (total, available) = registry.totals();
        MarketStats {
            cities: graph.city_count(),
            routes: graph.edge_count(),
            storage_centers: registry.len(),
            total_storage_capacity: total,
            available_storage: available,
            pending_orders: self.orders.size(),
        }
    }

    pub fn graph(&self) -> &CityGraph {
        self.router.graph()
    }

    pub fn registry(&self) -> &FacilityRegistry {
        self.allocator.registry()
    }

    pub fn orders(&self) -> &OrderQueue {
        &self.orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::StorageFacility;
    use std::thread;

    #[test]
    fn test_default_stats() {
        let core = MarketCore::from_config(&MarketConfig::default()).unwrap();
        let stats = core.stats();
        assert_eq!(stats.cities, 8);
        assert_eq!(stats.routes, 12);
        assert_eq!(stats.storage_centers, 4);
        assert_eq!(stats.total_storage_capacity, 45_000);
        assert_eq!(stats.available_storage, 37_000);
        assert_eq!(stats.pending_orders, 0);
    }

    #[test]
    fn test_engines_are_independent() {
        let core = MarketCore::from_config(&MarketConfig::default()).unwrap();
        core.enqueue("buyer1", 1, 500);
        core.allocate(500).unwrap();
        let stats = core.stats();
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.available_storage, 36_500);
        assert_eq!(core.shortest_path("Lahore", "Islamabad").unwrap().distance, 375);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MarketConfig {
            facilities: Some(vec![
                StorageFacility::new(1, "a", "Lahore", 10, 4.0),
                StorageFacility::new(1, "b", "Lahore", 10, 4.0),
            ]),
            ..MarketConfig::default()
        };
        assert!(MarketCore::from_config(&config).is_err());
    }

    #[test]
    fn test_concurrent_allocation_never_overcommits() {
        let registry = FacilityRegistry::from_facilities(vec![
            StorageFacility::new(1, "a", "Lahore", 1000, 4.0),
            StorageFacility::new(2, "b", "Multan", 700, 3.0),
        ])
        .unwrap();
        let core = Arc::new(MarketCore::new(CityGraph::default_network(), registry));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let core = core.clone();
                thread::spawn(move || {
                    (0..50)
                        .filter_map(|_| core.allocate(7))
                        .count() as u64
                })
            })
            .collect();
        let granted: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        let (total, available) = core.registry().totals();
        assert_eq!(total - available, granted * 7);
        // 1700 units hold at most 242 reservations of 7
        assert_eq!(granted, 142 + 100);
        for facility in core.registry().list() {
            assert!(facility.available_capacity <= facility.total_capacity);
            assert!(facility.available_capacity < 7);
        }
    }
}
