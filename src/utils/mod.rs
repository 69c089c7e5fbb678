//! Utility functions

pub mod input;
pub mod memory;
pub mod time;

pub use input::{parse_edges, write_edges};
pub use memory::{format_bytes, resident_kb};
pub use time::{format_elapsed, format_seconds, now_utc};
