use std::collections::HashMap;
use std::io::Cursor;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use atlas::benchmark::memory::{fill_byte, stride_for};
use atlas::benchmark::{AccessBound, Graph, GraphSolver, StressBuffer, StressRunner};
use atlas::models::{Edge, EdgeList, InitStrategy};
use atlas::{AppError, Config, Shutdown};

const SENTINEL: u64 = 1_000_000_000_000_000_000;
const OFFSET: u64 = 101_010;

fn config(pairs: &[(&str, &str)]) -> Config {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |key| map.get(key).cloned()).unwrap()
}

fn random_edges(rng: &mut StdRng, count: usize, node_space: usize) -> EdgeList {
    (0..count)
        .map(|_| Edge::new(rng.random_range(0..node_space), rng.random_range(0..node_space)))
        .collect::<Vec<_>>()
        .into()
}

fn edges_strategy(node_space: usize) -> impl Strategy<Value = Vec<Edge>> {
    prop::collection::vec((0..node_space, 0..node_space), 0..400)
        .prop_map(|pairs| pairs.into_iter().map(|(u, v)| Edge::new(u, v)).collect())
}

proptest! {
    #[test]
    fn prop_single_source_admits_no_further_relaxation(edges in edges_strategy(600)) {
        let edges = EdgeList::from(edges);
        let graph = Graph::build(600, &edges).unwrap();
        let solver = GraphSolver::new(InitStrategy::SingleSource { source: 0, sentinel: SENTINEL });
        let dist = solver.solve(&graph).distances;
        let dist = dist.as_slice();

        prop_assert_eq!(dist[0], 0);
        for (edge, w) in edges.weighted() {
            if dist[edge.u] != SENTINEL {
                prop_assert!(dist[edge.v] <= dist[edge.u] + w);
            }
            if dist[edge.v] != SENTINEL {
                prop_assert!(dist[edge.u] <= dist[edge.v] + w);
            }
        }
    }

    #[test]
    fn prop_seeded_never_exceeds_seed(edges in edges_strategy(600), offset in 0u64..1_000_000) {
        let graph = Graph::build(600, &EdgeList::from(edges)).unwrap();
        let dist = GraphSolver::new(InitStrategy::Seeded { offset }).solve(&graph).distances;

        prop_assert_eq!(dist.len(), 600);
        for (i, &d) in dist.as_slice().iter().enumerate() {
            prop_assert!(d <= i as u64 + offset);
        }
    }

    #[test]
    fn prop_checksum_is_pure(edges in edges_strategy(600)) {
        let graph = Graph::build(600, &EdgeList::from(edges)).unwrap();
        let solver = GraphSolver::new(InitStrategy::Seeded { offset: OFFSET });
        let first = solver.solve(&graph).distances;
        let second = solver.solve(&graph).distances;

        prop_assert_eq!(first.xor_checksum(), second.xor_checksum());
        prop_assert_eq!(first, second);
    }
}

#[test]
fn empty_graph_in_seeded_mode_reports_arithmetic_checksum() {
    let runner = StressRunner::new(config(&[("WORKLOAD", "graph")]), Shutdown::new());
    let report = runner
        .run_stress(Cursor::new("0\n"), AccessBound::Passes(0))
        .unwrap();

    let expected = (0..100_010u64).fold(0, |acc, i| acc ^ (i + OFFSET));
    assert_eq!(report.graph.as_ref().unwrap().checksum, expected);
    assert_eq!(report.render_text(), format!("{}\n", expected));
}

#[test]
fn single_zero_weight_edge_in_single_source_mode() {
    let edges = EdgeList::from(vec![Edge::new(0, 1)]);
    let graph = Graph::build(100_010, &edges).unwrap();
    let dist = GraphSolver::new(InitStrategy::SingleSource { source: 0, sentinel: SENTINEL })
        .solve(&graph)
        .distances;

    assert_eq!(dist.get(0), Some(0));
    assert_eq!(dist.get(1), Some(0));
    assert!(dist.as_slice()[2..].iter().all(|&d| d == SENTINEL));
}

#[test]
fn combined_run_is_reproducible_for_fixed_pass_count() {
    let mut rng = StdRng::seed_from_u64(2024);
    let edges = random_edges(&mut rng, 5_000, 100_010);
    let mut input = Vec::new();
    atlas::utils::write_edges(&mut input, &edges).unwrap();

    let runner = StressRunner::new(
        config(&[("WORKLOAD", "combined"), ("BUFFER_BYTES", "1000000")]),
        Shutdown::new(),
    );
    let first = runner
        .run_stress(Cursor::new(input.clone()), AccessBound::Passes(4))
        .unwrap();
    let second = runner
        .run_stress(Cursor::new(input), AccessBound::Passes(4))
        .unwrap();

    let (a, b) = (first.memory.unwrap(), second.memory.unwrap());
    assert_eq!(first.graph.unwrap().checksum, second.graph.unwrap().checksum);
    assert_eq!(a.passes, 4);
    assert_eq!(a.stride, stride_for(1_000_000));
    assert_eq!(a.sample_sum, b.sample_sum);
}

#[test]
fn sampled_bytes_match_independent_fill() {
    let mut rng = StdRng::seed_from_u64(7);
    let edges = random_edges(&mut rng, 2_000, 1_000);
    let graph = Graph::build(1_000, &edges).unwrap();
    let dist = GraphSolver::new(InitStrategy::Seeded { offset: OFFSET })
        .solve(&graph)
        .distances;

    let mut buffer = StressBuffer::allocate(20_000).unwrap();
    buffer.fill(&dist).unwrap();

    let stride = stride_for(20_000);
    let expected: u64 = (0..20_000)
        .step_by(stride)
        .map(|i| u64::from(fill_byte(dist.as_slice(), i)))
        .sum();
    assert_eq!(buffer.sample_pass(stride), expected);
}

#[test]
fn oversized_buffer_is_an_allocation_failure() {
    let runner = StressRunner::new(
        config(&[("WORKLOAD", "combined"), ("BUFFER_BYTES", &usize::MAX.to_string())]),
        Shutdown::new(),
    );
    let err = runner
        .run_stress(Cursor::new("1\n0 1\n"), AccessBound::Passes(1))
        .unwrap_err();

    assert!(matches!(err, AppError::AllocationFailure { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn out_of_range_edge_is_rejected_before_allocation() {
    let runner = StressRunner::new(
        config(&[("WORKLOAD", "combined"), ("BUFFER_BYTES", &usize::MAX.to_string())]),
        Shutdown::new(),
    );
    let err = runner
        .run_stress(Cursor::new("2\n0 1\n3 100010\n"), AccessBound::Passes(1))
        .unwrap_err();

    assert!(matches!(err, AppError::NodeOutOfRange { node: 100_010, line: 3, .. }));
}
