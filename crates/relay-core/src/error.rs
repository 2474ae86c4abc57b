//! Error types for Relay Core
//!
//! Provides a unified error type for everything a front-end can call.

use crate::config::ConfigError;
use crate::llm::UpstreamError;
use crate::orchestration::OrchestrationError;
use thiserror::Error;

/// Result type for Relay Core operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Unified error type for Relay Core
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration error (including a missing credential)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Workflow could not be resolved or a step failed
    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    /// Blocking task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

impl RelayError {
    /// Create a task error
    pub fn task(msg: impl Into<String>) -> Self {
        RelayError::Task(msg.into())
    }

    /// Whether the failure is a server-side configuration problem
    pub fn is_config(&self) -> bool {
        matches!(self, RelayError::Config(_))
    }
}
