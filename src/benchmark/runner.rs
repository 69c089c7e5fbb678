//! Workload driver
//!
//! Owns the configuration and shutdown flag for one process run and
//! sequences the phases: parse -> graph solver -> memory stressor, or the
//! standalone memory hold. Input is fully validated before any stress work
//! starts.

use std::io::{BufRead, Write};

use anyhow::anyhow;

use crate::benchmark::graph::{GraphSolver, generate_edges};
use crate::benchmark::hold::MemoryHold;
use crate::benchmark::memory::{AccessBound, MemoryStressor};
use crate::config::{Config, Workload};
use crate::error::{AppError, AppResult};
use crate::models::RunReport;
use crate::shutdown::Shutdown;
use crate::utils::{now_utc, parse_edges, write_edges};

/// Runs the configured workload
#[derive(Debug, Clone)]
pub struct StressRunner {
    config: Config,
    shutdown: Shutdown,
}

impl StressRunner {
    /// Create a new runner
    pub fn new(config: Config, shutdown: Shutdown) -> Self {
        Self { config, shutdown }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the configured workload to completion.
    ///
    /// CPU and memory phases run on the blocking pool so the signal
    /// listener keeps being polled.
    pub async fn run<R>(&self, input: R) -> AppResult<RunReport>
    where
        R: BufRead + Send + 'static,
    {
        match self.config.workload {
            Workload::Combined | Workload::Graph => {
                let runner = self.clone();
                let bound = AccessBound::Budget(self.config.memory.time_budget);
                tokio::task::spawn_blocking(move || runner.run_stress(input, bound))
                    .await
                    .map_err(|e| AppError::Internal(anyhow!("stress task failed: {}", e)))?
            }
            Workload::Hold => self.run_hold().await,
            Workload::Generate => Err(AppError::Internal(anyhow!(
                "the generate workload writes an edge list, use StressRunner::generate"
            ))),
        }
    }

    /// Graph solver, then (for the combined workload) the memory stressor
    pub fn run_stress<R: BufRead>(&self, input: R, bound: AccessBound) -> AppResult<RunReport> {
        let mut report = RunReport::new(self.config.workload, now_utc());
        let graph_config = &self.config.graph;

        let edges = parse_edges(input, graph_config.node_space)?;
        tracing::info!(
            edges = edges.len(),
            node_space = graph_config.node_space,
            "Input validated"
        );

        let solver = GraphSolver::new(graph_config.init);
        let (distances, graph_report) = solver.run(graph_config.node_space, &edges)?;
        report.graph = Some(graph_report);

        if self.shutdown.is_triggered() {
            return Err(AppError::Interrupted("graph solver"));
        }

        if self.config.workload == Workload::Combined {
            let stressor = MemoryStressor::new(self.config.memory.buffer_bytes, self.shutdown.clone());
            report.memory = Some(stressor.run(&distances, bound)?);
        }

        Ok(report)
    }

    /// Allocate, hold and release the configured buffer
    pub async fn run_hold(&self) -> AppResult<RunReport> {
        let mut report = RunReport::new(Workload::Hold, now_utc());
        let hold = MemoryHold::new(&self.config.hold, self.shutdown.clone());
        report.hold = Some(hold.run().await?);
        Ok(report)
    }

    /// Write a deterministic random edge list; returns the edge count
    pub fn generate<W: Write>(&self, writer: W) -> AppResult<usize> {
        let generate = &self.config.generate;
        let edges = generate_edges(generate.edges, self.config.graph.node_space, generate.seed);
        write_edges(writer, &edges)?;

        tracing::info!(
            edges = edges.len(),
            seed = generate.seed,
            "Generated edge list"
        );
        Ok(edges.len())
    }
}
