//! Workload configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before any stress work runs.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::constants::{
    DEFAULT_BUFFER_BYTES, DEFAULT_DIST_SENTINEL, DEFAULT_GENERATE_EDGES, DEFAULT_GENERATE_SEED,
    DEFAULT_HOLD_BYTES, DEFAULT_HOLD_SECS, DEFAULT_NODE_SPACE, DEFAULT_SEED_OFFSET,
    DEFAULT_SOURCE_NODE, DEFAULT_TIME_BUDGET_SECS, MIN_NODE_SPACE, workloads,
};
use crate::models::InitStrategy;

/// Main workload configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub workload: Workload,
    pub logging: LoggingConfig,
    pub report: ReportConfig,
    pub graph: GraphConfig,
    pub memory: MemoryConfig,
    pub hold: HoldConfig,
    pub generate: GenerateConfig,
}

/// Which workload the process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Workload {
    /// Graph solver followed by the memory stressor
    Combined,
    /// Graph solver only
    Graph,
    /// Allocate, hold idle, release
    Hold,
    /// Emit a deterministic random edge list
    Generate,
}

impl FromStr for Workload {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            workloads::COMBINED => Ok(Self::Combined),
            workloads::GRAPH => Ok(Self::Graph),
            workloads::HOLD => Ok(Self::Hold),
            workloads::GENERATE => Ok(Self::Generate),
            _ => Err(ConfigError::InvalidValue(format!(
                "WORKLOAD (expected one of {})",
                workloads::ALL.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Workload::Combined => write!(f, "{}", workloads::COMBINED),
            Workload::Graph => write!(f, "{}", workloads::GRAPH),
            Workload::Hold => write!(f, "{}", workloads::HOLD),
            Workload::Generate => write!(f, "{}", workloads::GENERATE),
        }
    }
}

/// Output format for either logs or results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(key: &str, value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue(key.to_string())),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub rust_log: String,
    pub format: OutputFormat,
}

/// Result reporting configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub format: OutputFormat,
}

/// Graph solver configuration
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Size of the node address space
    pub node_space: usize,
    /// How the distance array is initialized
    pub init: InitStrategy,
}

/// Memory stressor configuration
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Size of the stress buffer in bytes
    pub buffer_bytes: usize,
    /// Wall-clock budget for the access phase
    pub time_budget: Duration,
}

/// Memory-hold workload configuration
#[derive(Debug, Clone)]
pub struct HoldConfig {
    /// Size of the held allocation in bytes
    pub bytes: usize,
    /// How long the allocation is held
    pub duration: Duration,
}

/// Edge-list generator configuration
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub edges: usize,
    pub seed: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            workload: parse_or(&lookup, "WORKLOAD", Workload::Combined)?,
            logging: LoggingConfig::from_lookup(&lookup)?,
            report: ReportConfig::from_lookup(&lookup)?,
            graph: GraphConfig::from_lookup(&lookup)?,
            memory: MemoryConfig::from_lookup(&lookup)?,
            hold: HoldConfig::from_lookup(&lookup)?,
            generate: GenerateConfig::from_lookup(&lookup)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply the positional workload argument, if one was given
    pub fn with_workload_arg(mut self, arg: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(arg) = arg {
            self.workload = arg.parse()?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.node_space < MIN_NODE_SPACE {
            return Err(ConfigError::InvalidValue(format!(
                "NODE_SPACE (must be at least {})",
                MIN_NODE_SPACE
            )));
        }
        if let InitStrategy::SingleSource { source, .. } = self.graph.init {
            if source >= self.graph.node_space {
                return Err(ConfigError::InvalidValue(
                    "SOURCE_NODE (must be inside the node space)".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, ConfigError> {
        Ok(Self {
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "atlas=info".to_string()),
            format: match lookup("LOG_FORMAT") {
                Some(v) => OutputFormat::parse("LOG_FORMAT", &v)?,
                None => OutputFormat::Text,
            },
        })
    }
}

impl ReportConfig {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, ConfigError> {
        Ok(Self {
            format: match lookup("REPORT_FORMAT") {
                Some(v) => OutputFormat::parse("REPORT_FORMAT", &v)?,
                None => OutputFormat::Text,
            },
        })
    }
}

impl GraphConfig {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, ConfigError> {
        let strategy = lookup("INIT_STRATEGY").unwrap_or_else(|| "seeded".to_string());
        let init = match strategy.trim().to_ascii_lowercase().as_str() {
            "seeded" => InitStrategy::Seeded {
                offset: parse_or(lookup, "SEED_OFFSET", DEFAULT_SEED_OFFSET)?,
            },
            "single_source" | "single-source" => InitStrategy::SingleSource {
                source: parse_or(lookup, "SOURCE_NODE", DEFAULT_SOURCE_NODE)?,
                sentinel: parse_or(lookup, "DIST_SENTINEL", DEFAULT_DIST_SENTINEL)?,
            },
            _ => return Err(ConfigError::InvalidValue("INIT_STRATEGY".to_string())),
        };

        Ok(Self {
            node_space: parse_or(lookup, "NODE_SPACE", DEFAULT_NODE_SPACE)?,
            init,
        })
    }
}

impl MemoryConfig {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, ConfigError> {
        Ok(Self {
            buffer_bytes: parse_or(lookup, "BUFFER_BYTES", DEFAULT_BUFFER_BYTES)?,
            time_budget: parse_secs(lookup, "TIME_BUDGET_SECS", DEFAULT_TIME_BUDGET_SECS)?,
        })
    }
}

impl HoldConfig {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, ConfigError> {
        Ok(Self {
            bytes: parse_or(lookup, "HOLD_BYTES", DEFAULT_HOLD_BYTES)?,
            duration: parse_secs(lookup, "HOLD_SECS", DEFAULT_HOLD_SECS)?,
        })
    }
}

impl GenerateConfig {
    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<Self, ConfigError> {
        Ok(Self {
            edges: parse_or(lookup, "GENERATE_EDGES", DEFAULT_GENERATE_EDGES)?,
            seed: parse_or(lookup, "GENERATE_SEED", DEFAULT_GENERATE_SEED)?,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: f64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: f64 = parse_or(lookup, key, default)?;
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
