//! Graph solver
//!
//! Priority-driven relaxation (Dijkstra with lazy deletion) over an
//! undirected graph whose edge weights are their ingestion indices. The
//! frontier is a binary min-heap that may hold superseded entries for a
//! node; those are skipped on extraction instead of being removed eagerly.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{AppError, AppResult};
use crate::models::{Edge, EdgeList, GraphReport, InitStrategy, SolverStats};

/// Adjacency list over a fixed node space.
///
/// Every edge is stored once per endpoint as `(neighbor, weight)`; a
/// self-loop is therefore stored twice on the same node.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<(usize, u64)>>,
    edge_count: usize,
}

impl Graph {
    /// Build the adjacency for `edges` over nodes `0..node_space`
    pub fn build(node_space: usize, edges: &EdgeList) -> AppResult<Self> {
        let mut adjacency = vec![Vec::new(); node_space];

        for (index, (edge, weight)) in edges.weighted().enumerate() {
            for node in [edge.u, edge.v] {
                if node >= node_space {
                    return Err(AppError::EdgeOutOfRange {
                        edge: index,
                        node,
                        node_space,
                    });
                }
            }
            adjacency[edge.u].push((edge.v, weight));
            adjacency[edge.v].push((edge.u, weight));
        }

        Ok(Self {
            adjacency,
            edge_count: edges.len(),
        })
    }

    pub fn node_space(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn neighbors(&self, node: usize) -> &[(usize, u64)] {
        &self.adjacency[node]
    }
}

/// Final distance per node, indexed by node id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceArray {
    values: Vec<u64>,
}

impl DistanceArray {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    pub fn get(&self, node: usize) -> Option<u64> {
        self.values.get(node).copied()
    }

    /// XOR of every distance
    pub fn xor_checksum(&self) -> u64 {
        self.values.iter().fold(0, |acc, d| acc ^ d)
    }
}

impl From<Vec<u64>> for DistanceArray {
    fn from(values: Vec<u64>) -> Self {
        Self { values }
    }
}

/// Output of a solver run
#[derive(Debug, Clone)]
pub struct Solution {
    pub distances: DistanceArray,
    pub stats: SolverStats,
}

/// Shortest-path solver with a configurable initialization strategy
#[derive(Debug, Clone, Copy)]
pub struct GraphSolver {
    init: InitStrategy,
}

impl GraphSolver {
    pub fn new(init: InitStrategy) -> Self {
        Self { init }
    }

    /// Run relaxation until the frontier drains
    pub fn solve(&self, graph: &Graph) -> Solution {
        let n = graph.node_space();
        let mut dist: Vec<u64> = (0..n).map(|node| self.init.initial_distance(node)).collect();
        let mut stats = SolverStats::default();
        let mut frontier: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

        match self.init {
            InitStrategy::SingleSource { source, .. } => {
                if source < n {
                    frontier.push(Reverse((0, source)));
                    stats.pushes += 1;
                }
            }
            InitStrategy::Seeded { .. } => {
                // every node enters the frontier at its seed
                frontier.reserve(n);
                for (node, &seed) in dist.iter().enumerate() {
                    frontier.push(Reverse((seed, node)));
                }
                stats.pushes += n as u64;
            }
        }
        stats.max_frontier = frontier.len() as u64;

        while let Some(Reverse((d, u))) = frontier.pop() {
            stats.pops += 1;
            if d > dist[u] {
                stats.stale_discards += 1;
                continue;
            }

            for &(v, w) in graph.neighbors(u) {
                let candidate = d.saturating_add(w);
                if candidate < dist[v] {
                    dist[v] = candidate;
                    frontier.push(Reverse((candidate, v)));
                    stats.pushes += 1;
                    stats.relaxations += 1;
                }
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len() as u64);
        }

        Solution {
            distances: DistanceArray::from(dist),
            stats,
        }
    }

    /// Build, solve and summarize in one step
    pub fn run(&self, node_space: usize, edges: &EdgeList) -> AppResult<(DistanceArray, GraphReport)> {
        let start = Instant::now();
        let graph = Graph::build(node_space, edges)?;
        let Solution { distances, stats } = self.solve(&graph);
        let checksum = distances.xor_checksum();
        let elapsed = start.elapsed();

        tracing::info!(
            node_space,
            edges = graph.edge_count(),
            init = %self.init,
            checksum,
            pushes = stats.pushes,
            pops = stats.pops,
            stale = stats.stale_discards,
            relaxations = stats.relaxations,
            max_frontier = stats.max_frontier,
            elapsed_ms = elapsed.as_millis() as u64,
            "Graph solver finished"
        );

        let report = GraphReport {
            node_space,
            edge_count: graph.edge_count(),
            init: self.init,
            checksum,
            stats,
            elapsed_secs: elapsed.as_secs_f64(),
        };
        Ok((distances, report))
    }
}

/// Deterministic random edge list over `0..node_space`
pub fn generate_edges(count: usize, node_space: usize, seed: u64) -> EdgeList {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges = (0..count)
        .map(|_| Edge::new(rng.random_range(0..node_space), rng.random_range(0..node_space)))
        .collect::<Vec<_>>();
    EdgeList::new(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE_SPACE: usize = 100_010;
    const OFFSET: u64 = 101_010;
    const SENTINEL: u64 = 1_000_000_000_000_000_000;

    fn single_source() -> GraphSolver {
        GraphSolver::new(InitStrategy::SingleSource {
            source: 0,
            sentinel: SENTINEL,
        })
    }

    fn solve(solver: GraphSolver, node_space: usize, edges: Vec<Edge>) -> Solution {
        let graph = Graph::build(node_space, &EdgeList::from(edges)).unwrap();
        solver.solve(&graph)
    }

    #[test]
    fn test_seeded_without_edges_keeps_seeds() {
        let solution = solve(GraphSolver::new(InitStrategy::Seeded { offset: OFFSET }), NODE_SPACE, vec![]);
        let dist = solution.distances.as_slice();

        assert_eq!(dist.len(), NODE_SPACE);
        assert!(dist.iter().enumerate().all(|(i, &d)| d == i as u64 + OFFSET));

        let expected = (0..NODE_SPACE as u64).fold(0, |acc, i| acc ^ (i + OFFSET));
        assert_eq!(solution.distances.xor_checksum(), expected);
        assert_eq!(solution.stats.pushes, NODE_SPACE as u64);
        assert_eq!(solution.stats.relaxations, 0);
    }

    #[test]
    fn test_single_edge_has_zero_weight() {
        let solution = solve(single_source(), NODE_SPACE, vec![Edge::new(0, 1)]);
        let dist = solution.distances.as_slice();

        assert_eq!(dist[0], 0);
        assert_eq!(dist[1], 0);
        assert!(dist[2..].iter().all(|&d| d == SENTINEL));
    }

    #[test]
    fn test_single_edge_seeded_keeps_other_seeds() {
        let solution = solve(
            GraphSolver::new(InitStrategy::Seeded { offset: OFFSET }),
            NODE_SPACE,
            vec![Edge::new(0, 1)],
        );
        let dist = solution.distances.as_slice();

        assert_eq!(dist[0], OFFSET);
        assert_eq!(dist[1], OFFSET);
        assert_eq!(dist[2], 2 + OFFSET);
    }

    #[test]
    fn test_weights_are_ingestion_order() {
        // 0-1 (w0), 1-2 (w1), 0-2 (w2): 2 is reached via 1 at cost 1
        let solution = solve(
            single_source(),
            500,
            vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(0, 2)],
        );
        assert_eq!(solution.distances.get(2), Some(1));
    }

    #[test]
    fn test_stale_entries_are_discarded() {
        // 0-3 is ingested last, so 3 is first pushed at 4 and later improved to 3
        let edges = vec![
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(1, 3),
            Edge::new(0, 3),
        ];
        let solution = solve(single_source(), 500, edges);
        assert_eq!(solution.distances.get(3), Some(3));
        assert!(solution.stats.stale_discards > 0);
        assert_eq!(solution.stats.pops, solution.stats.pushes);
    }

    #[test]
    fn test_self_loops_and_duplicates_are_tolerated() {
        let solution = solve(
            single_source(),
            500,
            vec![Edge::new(0, 0), Edge::new(0, 1), Edge::new(0, 1), Edge::new(1, 1)],
        );
        assert_eq!(solution.distances.get(0), Some(0));
        assert_eq!(solution.distances.get(1), Some(1));
    }

    #[test]
    fn test_build_rejects_out_of_range() {
        let err = Graph::build(500, &EdgeList::from(vec![Edge::new(0, 1), Edge::new(2, 500)])).unwrap_err();
        assert!(matches!(err, AppError::EdgeOutOfRange { edge: 1, node: 500, .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_checksum_is_reproducible() {
        let edges = generate_edges(2_000, 1_000, 7);
        let solver = GraphSolver::new(InitStrategy::Seeded { offset: OFFSET });
        let (_, first) = solver.run(1_000, &edges).unwrap();
        let (_, second) = solver.run(1_000, &edges).unwrap();
        assert_eq!(first.checksum, second.checksum);
    }

    #[test]
    fn test_generate_edges_is_deterministic() {
        let a = generate_edges(100, 500, 42);
        let b = generate_edges(100, 500, 42);
        let c = generate_edges(100, 500, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.as_slice().iter().all(|e| e.u < 500 && e.v < 500));
    }
}
