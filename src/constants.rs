//! Workload-wide constants
//!
//! Default values for every tunable knob, grouped by the phase that uses them.
//! Each default can be overridden through the environment (see `config.rs`).

// =============================================================================
// GRAPH SOLVER DEFAULTS
// =============================================================================

/// Default size of the node address space
pub const DEFAULT_NODE_SPACE: usize = 100_010;

/// Default seed offset for the seeded initialization strategy
pub const DEFAULT_SEED_OFFSET: u64 = 101_010;

/// Default "infinity" sentinel for the single-source strategy
pub const DEFAULT_DIST_SENTINEL: u64 = 1_000_000_000_000_000_000;

/// Default source node for the single-source strategy
pub const DEFAULT_SOURCE_NODE: usize = 0;

// =============================================================================
// MEMORY STRESSOR DEFAULTS
// =============================================================================

/// Default stress buffer size in bytes (256 MB)
pub const DEFAULT_BUFFER_BYTES: usize = 256 * 1024 * 1024;

/// Default wall-clock budget for the access phase in seconds
pub const DEFAULT_TIME_BUDGET_SECS: f64 = 5.0;

/// Target number of samples taken per access pass
pub const SAMPLES_PER_PASS: usize = 1000;

/// Distance-array moduli combined by the fill function
pub const FILL_MODULI: [usize; 5] = [128, 7, 50, 120, 500];

/// Period of the fill pattern: lcm(128, 7, 50, 120, 500)
pub const FILL_PERIOD: usize = 336_000;

/// Smallest node space the fill function can index
pub const MIN_NODE_SPACE: usize = 500;

// =============================================================================
// MEMORY-HOLD DEFAULTS
// =============================================================================

/// Default hold allocation in bytes (512 MB)
pub const DEFAULT_HOLD_BYTES: usize = 512 * 1024 * 1024;

/// Default hold duration in seconds
pub const DEFAULT_HOLD_SECS: f64 = 10.0;

/// Granularity of the shutdown check while holding
pub const HOLD_POLL_INTERVAL_MS: u64 = 50;

// =============================================================================
// INPUT GENERATION DEFAULTS
// =============================================================================

/// Default number of edges emitted by the `generate` workload
pub const DEFAULT_GENERATE_EDGES: usize = 200_000;

/// Default RNG seed for the `generate` workload
pub const DEFAULT_GENERATE_SEED: u64 = 42;

// =============================================================================
// PROCESS EXIT CODES
// =============================================================================

/// Exit codes reported to the harness
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 1;
    pub const CONFIGURATION: i32 = 2;
    pub const ALLOCATION_FAILURE: i32 = 3;
    pub const INTERNAL: i32 = 4;
    pub const INTERRUPTED: i32 = 130;
}

// =============================================================================
// WORKLOAD NAMES
// =============================================================================

/// Workload identifiers accepted by `WORKLOAD` and the first CLI argument
pub mod workloads {
    pub const COMBINED: &str = "combined";
    pub const GRAPH: &str = "graph";
    pub const HOLD: &str = "hold";
    pub const GENERATE: &str = "generate";

    pub const ALL: &[&str] = &[COMBINED, GRAPH, HOLD, GENERATE];
}
