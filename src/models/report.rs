//! Workload result models

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Workload;
use crate::models::InitStrategy;
use crate::utils::format_seconds;

/// Frontier instrumentation collected by the graph solver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SolverStats {
    /// Entries inserted into the frontier
    pub pushes: u64,
    /// Entries extracted from the frontier
    pub pops: u64,
    /// Extracted entries discarded because a better distance was already known
    pub stale_discards: u64,
    /// Successful distance improvements
    pub relaxations: u64,
    /// Largest frontier size observed
    pub max_frontier: u64,
}

/// Graph solver result
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub node_space: usize,
    pub edge_count: usize,
    pub init: InitStrategy,
    /// XOR of every entry in the distance array
    pub checksum: u64,
    pub stats: SolverStats,
    pub elapsed_secs: f64,
}

/// Memory stressor result
#[derive(Debug, Clone, Serialize)]
pub struct AccessReport {
    pub buffer_bytes: usize,
    pub stride: usize,
    /// Complete passes over the buffer
    pub passes: u64,
    /// Sum of every sampled byte
    pub sample_sum: u64,
    pub fill_secs: f64,
    /// Wall-clock time spent in the access phase
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

/// Memory-hold result
#[derive(Debug, Clone, Serialize)]
pub struct HoldReport {
    pub bytes: usize,
    #[serde(rename = "held_secs", serialize_with = "serialize_secs")]
    pub held: Duration,
    pub rss_before_kb: Option<u64>,
    pub rss_held_kb: Option<u64>,
    pub rss_after_kb: Option<u64>,
}

/// Everything a single run reports
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub workload: Workload,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<AccessReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<HoldReport>,
}

impl RunReport {
    pub fn new(workload: Workload, started_at: DateTime<Utc>) -> Self {
        Self {
            workload,
            started_at,
            graph: None,
            memory: None,
            hold: None,
        }
    }

    /// Line-oriented result stream: one value per line.
    ///
    /// Graph: checksum. Memory: access seconds (2 decimals), then sample sum.
    /// Hold: held bytes, then held seconds.
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();

        if let Some(graph) = &self.graph {
            lines.push(graph.checksum.to_string());
        }
        if let Some(memory) = &self.memory {
            lines.push(format_seconds(memory.elapsed));
            lines.push(memory.sample_sum.to_string());
        }
        if let Some(hold) = &self.hold {
            lines.push(hold.bytes.to_string());
            lines.push(format_seconds(hold.held));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Single-line JSON object
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}
