//! Atlas - Resource Stress Workload for Olympus
//!
//! A deterministic CPU and memory workload used to load-test the judge's
//! sandboxes. Each run produces checksums that prove the work actually
//! completed under the resource limits the sandbox imposed.
//!
//! # Workloads
//!
//! - **combined**: graph solver, then memory fill and timed strided access
//! - **graph**: graph solver only
//! - **hold**: allocate, hold idle, release
//! - **generate**: emit a reproducible edge list to feed the other workloads
//!
//! Results go to stdout one value per line; logs and diagnostics go to
//! stderr.

pub mod benchmark;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod shutdown;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use shutdown::Shutdown;
