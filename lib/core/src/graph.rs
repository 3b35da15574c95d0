// City network - undirected weighted graph over named locations
use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Fixed logistics network loaded at startup when no other network is configured
pub const DEFAULT_NETWORK: &[(&str, &str, u32)] = &[
    ("Lahore", "Islamabad", 375),
    ("Lahore", "Multan", 342),
    ("Lahore", "Sialkot", 110),
    ("Lahore", "Faisalabad", 180),
    ("Islamabad", "Peshawar", 450),
    ("Islamabad", "Multan", 680),
    ("Multan", "Faisalabad", 220),
    ("Multan", "Karachi", 980),
    ("Faisalabad", "Sialkot", 280),
    ("Faisalabad", "Karachi", 1050),
    ("Peshawar", "Quetta", 1200),
    ("Karachi", "Quetta", 1000),
];

/// An undirected road between two cities, weighted in kilometers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub distance: u32,
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }
}

/// Adjacency-list graph keyed by case-sensitive city name.
///
/// City names are interned to dense indices so the router can keep its
/// distance table in a plain `Vec`. Adjacency lists keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct CityGraph {
    index: AHashMap<String, usize>,
    names: Vec<String>,
    adjacency: Vec<Vec<(usize, u32)>>,
    edge_count: usize,
}

impl CityGraph {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a fixed edge list
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(&edge.from, &edge.to, edge.distance)?;
        }
        Ok(graph)
    }

    /// The built-in Pakistan logistics network
    #[must_use]
    pub fn default_network() -> Self {
        let mut graph = Self::new();
        for &(a, b, distance) in DEFAULT_NETWORK {
            graph.insert_both(a, b, distance);
        }
        graph
    }

    /// Add an undirected edge. Repeated edges are kept as parallel edges.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: u32) -> Result<()> {
        if weight == 0 {
            return Err(Error::InvalidWeight {
                from: a.to_string(),
                to: b.to_string(),
            });
        }
        self.insert_both(a, b, weight);
        Ok(())
    }

    fn insert_both(&mut self, a: &str, b: &str, weight: u32) {
        let ia = self.intern(a);
        let ib = self.intern(b);
        self.adjacency[ia].push((ib, weight));
        self.adjacency[ib].push((ia, weight));
        self.edge_count += 1;
    }

    fn intern(&mut self, city: &str) -> usize {
        if let Some(&idx) = self.index.get(city) {
            return idx;
        }
        let idx = self.names.len();
        self.index.insert(city.to_string(), idx);
        self.names.push(city.to_string());
        self.adjacency.push(Vec::new());
        idx
    }

    /// Neighbors of `city` with edge weights. Unknown cities have none.
    pub fn neighbors(&self, city: &str) -> Vec<(&str, u32)> {
        match self.index.get(city) {
            Some(&idx) => self.adjacency[idx]
                .iter()
                .map(|&(n, w)| (self.names[n].as_str(), w))
                .collect(),
            None => Vec::new(),
        }
    }

    #[inline]
    pub fn contains(&self, city: &str) -> bool {
        self.index.contains_key(city)
    }

    #[inline]
    pub fn city_count(&self) -> usize {
        self.names.len()
    }

    /// Number of `add_edge` registrations, parallel edges included
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// City names in first-seen order
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[inline]
    pub(crate) fn index_of(&self, city: &str) -> Option<usize> {
        self.index.get(city).copied()
    }

    #[inline]
    pub(crate) fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    #[inline]
    pub(crate) fn adjacent(&self, idx: usize) -> &[(usize, u32)] {
        &self.adjacency[idx]
    }
}
