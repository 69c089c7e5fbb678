//! Stress workload engine
//!
//! Atlas runs one of three workloads per process:
//!
//! 1. **Graph** (`graph.rs`): shortest-path relaxation over a graph whose
//!    edge weights are their input order, reduced to an XOR checksum.
//!
//! 2. **Combined** (`graph.rs` + `memory.rs`): the graph phase, followed by
//!    a buffer filled from the distance array and sampled at a fixed stride
//!    for a wall-clock budget.
//!
//! 3. **Hold** (`hold.rs`): allocate a fixed buffer, keep it resident for a
//!    fixed duration, release it.

pub mod graph;
pub mod hold;
pub mod memory;
pub mod runner;

pub use graph::{DistanceArray, Graph, GraphSolver};
pub use hold::MemoryHold;
pub use memory::{AccessBound, MemoryStressor, StressBuffer};
pub use runner::StressRunner;
