//! Memory-hold workload
//!
//! Allocates a fixed-size buffer, keeps it resident for a fixed duration,
//! then releases it. Used to check that the sandbox enforces its memory
//! limit; there is no fill pattern and no access phase.

use std::hint;
use std::time::Duration;

use tokio::time::{Instant, sleep};

use crate::config::HoldConfig;
use crate::constants::HOLD_POLL_INTERVAL_MS;
use crate::error::{AppError, AppResult};
use crate::models::HoldReport;
use crate::shutdown::Shutdown;
use crate::utils::{format_bytes, format_elapsed, resident_kb};
use crate::utils::time::remaining;

/// Allocate `len` zeroed bytes, touching every page so the allocation is
/// resident and counts against the sandbox limit.
pub fn allocate_resident(len: usize) -> AppResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|source| AppError::AllocationFailure {
            bytes: len,
            purpose: "hold",
            source,
        })?;
    buffer.resize(len, 0);
    Ok(hint::black_box(buffer))
}

/// Allocate, hold idle, release
pub struct MemoryHold {
    bytes: usize,
    duration: Duration,
    shutdown: Shutdown,
}

impl MemoryHold {
    pub fn new(config: &HoldConfig, shutdown: Shutdown) -> Self {
        Self {
            bytes: config.bytes,
            duration: config.duration,
            shutdown,
        }
    }

    /// Hold the allocation for the configured duration.
    ///
    /// An interrupt ends the hold early; the buffer is released before the
    /// `Interrupted` error is returned.
    pub async fn run(&self) -> AppResult<HoldReport> {
        let rss_before_kb = resident_kb();
        let buffer = allocate_resident(self.bytes)?;
        let rss_held_kb = resident_kb();

        tracing::info!(
            bytes = buffer.len(),
            size = %format_bytes(buffer.len()),
            duration = %format_elapsed(self.duration),
            rss_kb = rss_held_kb,
            "Holding allocation"
        );

        let tick = Duration::from_millis(HOLD_POLL_INTERVAL_MS);
        let start = Instant::now();
        let mut interrupted = false;

        loop {
            let left = remaining(self.duration, start.elapsed());
            if left.is_zero() {
                break;
            }
            if self.shutdown.is_triggered() {
                interrupted = true;
                break;
            }
            sleep(left.min(tick)).await;
        }

        let held = start.elapsed();
        drop(hint::black_box(buffer));
        let rss_after_kb = resident_kb();

        tracing::info!(
            held = %format_elapsed(held),
            rss_before_kb,
            rss_after_kb,
            interrupted,
            "Hold allocation released"
        );

        if interrupted {
            return Err(AppError::Interrupted("memory hold"));
        }

        Ok(HoldReport {
            bytes: self.bytes,
            held,
            rss_before_kb,
            rss_held_kb,
            rss_after_kb,
        })
    }
}
