//! Memory stressor
//!
//! Allocates a byte buffer, fills every byte from the solver's distance
//! array, then samples it at a fixed stride in full passes until a
//! wall-clock budget (or, in tests, a pass count) is exhausted.

use std::time::{Duration, Instant};

use crate::benchmark::graph::DistanceArray;
use crate::constants::{FILL_MODULI, MIN_NODE_SPACE, SAMPLES_PER_PASS};
use crate::error::{AppError, AppResult};
use crate::models::AccessReport;
use crate::shutdown::Shutdown;
use crate::utils::{format_bytes, format_elapsed, resident_kb};

/// Fill value of byte `index`: product of five distance entries, mod 256
#[inline]
pub fn fill_byte(dist: &[u64], index: usize) -> u8 {
    FILL_MODULI
        .iter()
        .fold(1u64, |acc, &m| acc.wrapping_mul(dist[index % m]))
        .to_le_bytes()[0]
}

/// Sampling stride for a buffer of `len` bytes
pub fn stride_for(len: usize) -> usize {
    (len / SAMPLES_PER_PASS).max(1)
}

/// When the access phase stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessBound {
    /// Keep starting passes until this much wall-clock time has elapsed
    Budget(Duration),
    /// Run exactly this many passes
    Passes(u64),
}

/// Exclusively owned stress buffer, released on drop
#[derive(Debug)]
pub struct StressBuffer {
    bytes: Vec<u8>,
    requested: usize,
}

impl StressBuffer {
    /// Reserve `len` bytes without touching them.
    ///
    /// Failure leaves nothing allocated.
    pub fn allocate(len: usize) -> AppResult<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|source| AppError::AllocationFailure {
                bytes: len,
                purpose: "stress",
                source,
            })?;
        Ok(Self {
            bytes,
            requested: len,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Write the fill pattern into every reserved byte
    pub fn fill(&mut self, dist: &DistanceArray) -> AppResult<()> {
        let dist = dist.as_slice();
        if dist.len() < MIN_NODE_SPACE {
            return Err(AppError::Internal(anyhow::anyhow!(
                "distance array has {} entries, fill needs at least {}",
                dist.len(),
                MIN_NODE_SPACE
            )));
        }

        let len = self.requested;
        self.bytes.clear();
        self.bytes.extend((0..len).map(|i| fill_byte(dist, i)));
        Ok(())
    }

    /// Sum the bytes at every `stride`-th position
    pub fn sample_pass(&self, stride: usize) -> u64 {
        self.bytes
            .iter()
            .step_by(stride)
            .map(|&b| u64::from(b))
            .sum()
    }
}

/// Allocate, fill and sample a buffer, seeded by `dist`
pub struct MemoryStressor {
    buffer_bytes: usize,
    shutdown: Shutdown,
}

impl MemoryStressor {
    pub fn new(buffer_bytes: usize, shutdown: Shutdown) -> Self {
        Self {
            buffer_bytes,
            shutdown,
        }
    }

    /// Run the fill and access phases.
    ///
    /// The buffer lives only for the duration of this call; it is dropped
    /// on success, on interrupt and on every error path.
    pub fn run(&self, dist: &DistanceArray, bound: AccessBound) -> AppResult<AccessReport> {
        let baseline_kb = resident_kb();
        let mut buffer = StressBuffer::allocate(self.buffer_bytes)?;

        let fill_start = Instant::now();
        buffer.fill(dist)?;
        let fill_elapsed = fill_start.elapsed();
        tracing::info!(
            bytes = buffer.len(),
            size = %format_bytes(buffer.len()),
            rss_kb = resident_kb(),
            elapsed = %format_elapsed(fill_elapsed),
            "Stress buffer filled"
        );

        let stride = stride_for(buffer.len());
        let mut passes: u64 = 0;
        let mut sample_sum: u64 = 0;
        let start = Instant::now();

        loop {
            let keep_going = match bound {
                AccessBound::Budget(budget) => start.elapsed() < budget,
                AccessBound::Passes(limit) => passes < limit,
            };
            if !keep_going {
                break;
            }
            if self.shutdown.is_triggered() {
                tracing::warn!(passes, "Shutdown requested, releasing stress buffer");
                return Err(AppError::Interrupted("memory access phase"));
            }

            sample_sum = sample_sum.wrapping_add(buffer.sample_pass(stride));
            passes += 1;
        }
        let elapsed = start.elapsed();

        let report = AccessReport {
            buffer_bytes: buffer.len(),
            stride,
            passes,
            sample_sum,
            fill_secs: fill_elapsed.as_secs_f64(),
            elapsed,
        };
        drop(buffer);

        tracing::info!(
            passes,
            stride,
            sample_sum,
            elapsed = %format_elapsed(elapsed),
            rss_before_kb = baseline_kb,
            rss_after_kb = resident_kb(),
            "Memory stress finished"
        );
        Ok(report)
    }
}
