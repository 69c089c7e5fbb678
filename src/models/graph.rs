//! Graph input models

use serde::{Deserialize, Serialize};

/// An undirected edge as ingested from the input.
///
/// Edges carry no weight field: the weight of an edge is its 0-based
/// position in the input (see [`EdgeList::weighted`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
}

impl Edge {
    pub fn new(u: usize, v: usize) -> Self {
        Self { u, v }
    }
}

/// Edges in ingestion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterate edges paired with their implicit weight (ingestion index)
    pub fn weighted(&self) -> impl Iterator<Item = (Edge, u64)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (*edge, index as u64))
    }
}

impl From<Vec<Edge>> for EdgeList {
    fn from(edges: Vec<Edge>) -> Self {
        Self::new(edges)
    }
}

/// Distance-array initialization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InitStrategy {
    /// `source` starts at 0, every other node at `sentinel`
    SingleSource { source: usize, sentinel: u64 },
    /// Node `i` starts at `i + offset` and is pushed into the frontier
    Seeded { offset: u64 },
}

impl InitStrategy {
    /// Starting distance of `node` under this strategy
    pub fn initial_distance(&self, node: usize) -> u64 {
        match *self {
            InitStrategy::SingleSource { source, sentinel } => {
                if node == source {
                    0
                } else {
                    sentinel
                }
            }
            InitStrategy::Seeded { offset } => (node as u64).saturating_add(offset),
        }
    }
}

impl std::fmt::Display for InitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitStrategy::SingleSource { source, .. } => write!(f, "single_source({})", source),
            InitStrategy::Seeded { offset } => write!(f, "seeded(+{})", offset),
        }
    }
}
