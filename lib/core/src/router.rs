use crate::graph::CityGraph;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Average transport speed used for transit estimates, in km/h
pub const AVERAGE_SPEED_KMH: u64 = 80;

/// Estimated transit time, truncated to whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitEstimate {
    pub hours: u64,
    pub minutes: u64,
}

impl TransitEstimate {
    #[inline]
    #[must_use]
    pub fn from_distance(distance: u64) -> Self {
        Self {
            hours: distance / AVERAGE_SPEED_KMH,
            minutes: (distance % AVERAGE_SPEED_KMH) * 60 / AVERAGE_SPEED_KMH,
        }
    }
}

impl fmt::Display for TransitEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Least-cost path between two cities, start and end inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePath {
    pub cities: Vec<String>,
    pub distance: u64,
    pub estimate: TransitEstimate,
}

impl RoutePath {
    /// Cities joined with `" -> "`
    pub fn path_string(&self) -> String {
        self.cities.join(" -> ")
    }
}

/// Frontier entry. `seq` is the push order and breaks distance ties so
/// identical inputs always expand cities in the same order.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Frontier {
    dist: u64,
    seq: u64,
    idx: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smaller distance, then earlier push = higher priority
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra shortest-path search over a shared, read-only [`CityGraph`]
#[derive(Debug, Clone)]
pub struct Router {
    graph: Arc<CityGraph>,
}

impl Router {
    pub fn new(graph: Arc<CityGraph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    /// Cheapest path from `start` to `end`.
    ///
    /// Returns `None` when either city is unknown or `end` is unreachable.
    /// Runs in O((V+E) log V) and stops as soon as `end` leaves the frontier.
    pub fn shortest_path(&self, start: &str, end: &str) -> Option<RoutePath> {
        let graph = &*self.graph;
        let (Some(source), Some(target)) = (graph.index_of(start), graph.index_of(end)) else {
            debug!(start, end, "route endpoint not in network");
            return None;
        };

        let n = graph.city_count();
        let mut dist = vec![u64::MAX; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        dist[source] = 0;
        heap.push(Frontier { dist: 0, seq, idx: source });

        while let Some(Frontier { dist: d, idx: u, .. }) = heap.pop() {
            if d > dist[u] {
                continue;
            }
            if u == target {
                break;
            }
            for &(v, weight) in graph.adjacent(u) {
                let next = d + u64::from(weight);
                if next < dist[v] {
                    dist[v] = next;
                    prev[v] = Some(u);
                    seq += 1;
                    heap.push(Frontier { dist: next, seq, idx: v });
                }
            }
        }

        if dist[target] == u64::MAX {
            debug!(start, end, "no route between cities");
            return None;
        }

        let mut cities = Vec::new();
        let mut cursor = Some(target);
        while let Some(idx) = cursor {
            cities.push(graph.name(idx).to_string());
            cursor = prev[idx];
        }
        cities.reverse();

        let distance = dist[target];
        debug!(start, end, distance, hops = cities.len() - 1, "route computed");
        Some(RoutePath {
            cities,
            distance,
            estimate: TransitEstimate::from_distance(distance),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn default_router() -> Router {
        Router::new(Arc::new(CityGraph::default_network()))
    }

    fn path_weight(graph: &CityGraph, cities: &[String]) -> u64 {
        cities
            .windows(2)
            .map(|pair| {
                graph
                    .neighbors(&pair[0])
                    .into_iter()
                    .filter(|(city, _)| *city == pair[1])
                    .map(|(_, w)| u64::from(w))
                    .min()
                    .expect("consecutive cities must be adjacent")
            })
            .sum()
    }

    /// Plain Bellman-Ford relaxation used as a reference distance
    fn reference_distance(edges: &[Edge], start: &str, end: &str) -> Option<u64> {
        let mut dist: std::collections::HashMap<&str, u64> = std::collections::HashMap::new();
        dist.insert(start, 0);
        loop {
            let mut changed = false;
            for e in edges {
                for (a, b) in [(e.from.as_str(), e.to.as_str()), (e.to.as_str(), e.from.as_str())] {
                    if let Some(&da) = dist.get(a) {
                        let nd = da + u64::from(e.distance);
                        if dist.get(b).map_or(true, |&db| nd < db) {
                            dist.insert(b, nd);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
        dist.get(end).copied()
    }

    #[test]
    fn test_transit_estimate() {
        assert_eq!(TransitEstimate::from_distance(375).to_string(), "4h 41m");
        assert_eq!(TransitEstimate::from_distance(180).to_string(), "2h 15m");
        assert_eq!(TransitEstimate::from_distance(0).to_string(), "0h 0m");
        assert_eq!(TransitEstimate::from_distance(79).to_string(), "0h 59m");
        assert_eq!(TransitEstimate::from_distance(80).to_string(), "1h 0m");
    }

    #[test]
    fn test_direct_edge_beats_detour() {
        let route = default_router().shortest_path("Lahore", "Faisalabad").unwrap();
        assert_eq!(route.cities, vec!["Lahore", "Faisalabad"]);
        assert_eq!(route.distance, 180);
        assert_eq!(route.estimate.to_string(), "2h 15m");
        assert_eq!(route.path_string(), "Lahore -> Faisalabad");
    }

    #[test]
    fn test_multi_hop_route() {
        let route = default_router().shortest_path("Sialkot", "Quetta").unwrap();
        // northern corridor (2135) beats going through Karachi (2330 at best)
        assert_eq!(route.distance, 2135);
        assert_eq!(
            route.cities,
            vec!["Sialkot", "Lahore", "Islamabad", "Peshawar", "Quetta"]
        );
    }

    #[test]
    fn test_same_city() {
        let route = default_router().shortest_path("Multan", "Multan").unwrap();
        assert_eq!(route.cities, vec!["Multan"]);
        assert_eq!(route.distance, 0);
        assert_eq!(route.estimate.to_string(), "0h 0m");
    }

    #[test]
    fn test_unknown_city_not_found() {
        let router = default_router();
        assert!(router.shortest_path("Lahore", "Gwadar").is_none());
        assert!(router.shortest_path("Gwadar", "Lahore").is_none());
        assert!(router.shortest_path("Gwadar", "Gwadar").is_none());
        assert!(router.shortest_path("", "Lahore").is_none());
    }

    #[test]
    fn test_self_loop_is_harmless() {
        let graph = CityGraph::from_edges(vec![Edge::new("A", "A", 9), Edge::new("A", "B", 2)])
            .unwrap();
        assert_eq!(graph.neighbors("A"), vec![("A", 9), ("A", 9), ("B", 2)]);

        let router = Router::new(Arc::new(graph));
        let route = router.shortest_path("A", "A").unwrap();
        assert_eq!(route.cities, vec!["A"]);
        assert_eq!(route.distance, 0);
        assert_eq!(router.shortest_path("A", "B").unwrap().cities, vec!["A", "B"]);
    }

    #[test]
    fn test_unreachable_not_found() {
        let graph =
            CityGraph::from_edges(vec![Edge::new("A", "B", 3), Edge::new("C", "D", 4)]).unwrap();
        let router = Router::new(Arc::new(graph));
        assert!(router.shortest_path("A", "D").is_none());
        assert_eq!(router.shortest_path("C", "D").unwrap().distance, 4);
    }

    #[test]
    fn test_symmetric_distances() {
        let router = default_router();
        let cities: Vec<String> = router.graph().cities().map(str::to_string).collect();
        for a in &cities {
            for b in &cities {
                let ab = router.shortest_path(a, b).unwrap().distance;
                let ba = router.shortest_path(b, a).unwrap().distance;
                assert_eq!(ab, ba, "{a} <-> {b}");
            }
        }
    }

    #[test]
    fn test_random_graphs_match_reference() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let cities = rng.random_range(2..12);
            let edge_count = rng.random_range(1..30);
            let edges: Vec<Edge> = (0..edge_count)
                .map(|_| {
                    Edge::new(
                        format!("c{}", rng.random_range(0..cities)),
                        format!("c{}", rng.random_range(0..cities)),
                        rng.random_range(1..100),
                    )
                })
                .collect();
            let graph = Arc::new(CityGraph::from_edges(edges.clone()).unwrap());
            let router = Router::new(graph.clone());

            let names: Vec<String> = graph.cities().map(str::to_string).collect();
            for a in &names {
                for b in &names {
                    let expected = reference_distance(&edges, a, b);
                    let route = router.shortest_path(a, b);
                    assert_eq!(route.as_ref().map(|r| r.distance), expected);
                    if let Some(route) = route {
                        assert_eq!(route.cities.first(), Some(a));
                        assert_eq!(route.cities.last(), Some(b));
                        assert_eq!(path_weight(&graph, &route.cities), route.distance);
                    }
                }
            }
        }
    }

    #[test]
    fn test_deterministic_tie_break() {
        // Two equal-cost paths A-B-D and A-C-D
        let edges = vec![
            Edge::new("A", "B", 1),
            Edge::new("A", "C", 1),
            Edge::new("B", "D", 1),
            Edge::new("C", "D", 1),
        ];
        let router = Router::new(Arc::new(CityGraph::from_edges(edges).unwrap()));
        let first = router.shortest_path("A", "D").unwrap();
        for _ in 0..10 {
            assert_eq!(router.shortest_path("A", "D").unwrap(), first);
        }
        assert_eq!(first.cities, vec!["A", "B", "D"]);
    }
}
