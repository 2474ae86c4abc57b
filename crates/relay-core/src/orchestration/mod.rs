//! Agent Orchestration System
//!
//! Runs a fixed three-agent pipeline per workflow:
//! - editorial: Planner → Writer → Reviewer
//! - dev: Researcher → CodeWriter → Tester
//!
//! When the caller does not name a workflow, the router classifies the prompt.
//!
//! # Example
//!
//! ```no_run
//! use relay_core::orchestration::WorkflowOrchestrator;
//! use relay_core::{ProviderConfig, UpstreamClient};
//! use std::sync::Arc;
//!
//! let client = UpstreamClient::new(Arc::new(ProviderConfig::default()));
//! let orchestrator = WorkflowOrchestrator::new(client);
//!
//! let run = orchestrator.run("Write a launch blog post", None).unwrap();
//! for step in &run.timeline {
//!     println!("{}: {}", step.agent, step.text);
//! }
//! ```

mod orchestrator;
mod pipelines;
mod router;
mod types;

pub use orchestrator::{resolve_workflow, OrchestrationError, WorkflowOrchestrator, AUTO_WORKFLOW};
pub use pipelines::{pipeline, StepContext, StepSpec, DEV_PIPELINE, EDITORIAL_PIPELINE};
pub use router::{classify, is_editorial, DEV_KEYWORDS, EDITORIAL_KEYWORDS};
pub use types::{AgentStep, CompletionRequest, Timeline, WorkflowKind, WorkflowRun};
