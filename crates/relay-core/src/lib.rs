//! Relay Core - Backend library for Relay
//!
//! This crate provides the transport-agnostic backend functionality:
//! - Upstream LLM client (payload dialects, response normalization, retry/backoff)
//! - Workflow router (keyword classification of prompts)
//! - Workflow orchestrator (three-agent editorial and dev pipelines)
//! - Configuration loading
//!
//! Any front-end (HTTP server, CLI) consumes this crate through `RelayService`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  prompt   ┌──────────────┐  3 × call  ┌──────────────┐
//! │  Front-end   │ ─────────→│ RelayService │ ──────────→│   Upstream   │
//! │ (HTTP, CLI)  │ ←─────────│ Orchestrator │ ←──────────│   LLM API    │
//! └──────────────┘  timeline └──────────────┘    text    └──────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use relay_core::{load_config, CompletionRequest, RelayService};
//!
//! let config = load_config(&std::env::current_dir()?)?;
//! let service = RelayService::new(config);
//! service.ensure_credential()?;
//!
//! let run = service.run_workflow(&CompletionRequest::new("Write a release note"))?;
//! for step in &run.timeline {
//!     println!("[{}] {}", step.agent, step.text);
//! }
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod orchestration;
pub mod service;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use config::{load_config, ConfigError, ProviderConfig, RelayConfig, ServerConfig};
pub use error::{RelayError, Result};
pub use llm::{RetryPolicy, Transport, UpstreamClient, UpstreamError};
pub use orchestration::{
    classify, AgentStep, CompletionRequest, OrchestrationError, Timeline, WorkflowKind,
    WorkflowOrchestrator, WorkflowRun,
};
pub use service::RelayService;

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
