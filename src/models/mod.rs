//! Domain models
//!
//! Input graph types and the reports produced by each workload phase.

pub mod graph;
pub mod report;

pub use graph::*;
pub use report::*;
