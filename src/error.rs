//! Custom error types and handling
//!
//! This module defines the workload's error taxonomy and maps each error
//! to the process exit code the harness inspects.

use std::collections::TryReserveError;

use crate::config::ConfigError;
use crate::constants::exit_codes;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Input validation errors
    #[error("Invalid input on line {line}: {message}")]
    InvalidInput { line: usize, message: String },

    #[error("Node {node} on line {line} is outside the node space 0..{node_space}")]
    NodeOutOfRange {
        node: i64,
        line: usize,
        node_space: usize,
    },

    #[error("Edge {edge} references node {node} outside the node space 0..{node_space}")]
    EdgeOutOfRange {
        edge: usize,
        node: usize,
        node_space: usize,
    },

    // Resource errors
    #[error("Failed to allocate {bytes} bytes for the {purpose} buffer")]
    AllocationFailure {
        bytes: usize,
        purpose: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error("Interrupted during {0}")]
    Interrupted(&'static str),

    // Environment errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::NodeOutOfRange { .. } | Self::EdgeOutOfRange { .. } => "NODE_OUT_OF_RANGE",
            Self::AllocationFailure { .. } => "ALLOCATION_FAILURE",
            Self::Interrupted(_) => "INTERRUPTED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the process exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput { .. }
            | Self::NodeOutOfRange { .. }
            | Self::EdgeOutOfRange { .. }
            | Self::Io(_) => exit_codes::INVALID_INPUT,
            Self::Configuration(_) => exit_codes::CONFIGURATION,
            Self::Internal(_) => exit_codes::INTERNAL,
            Self::AllocationFailure { .. } => exit_codes::ALLOCATION_FAILURE,
            Self::Interrupted(_) => exit_codes::INTERRUPTED,
        }
    }

    /// Whether the error was caused by the input data rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::NodeOutOfRange { .. } | Self::EdgeOutOfRange { .. }
        )
    }

    /// Shorthand for an input error on a given 1-indexed line
    pub fn invalid_input(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
