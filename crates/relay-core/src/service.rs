//! Relay Service - main facade for front-ends
//!
//! Bundles the immutable configuration, the upstream client and the
//! orchestrator behind the three operations every front-end needs.
//!
//! The core stays credential-agnostic: `complete` and `run_workflow` will try
//! the upstream with or without a key. Front-ends call `ensure_credential`
//! first to reject requests early when none is configured.

use crate::config::{ConfigError, RelayConfig};
use crate::llm::UpstreamClient;
use crate::orchestration::{CompletionRequest, WorkflowOrchestrator, WorkflowRun};
use crate::Result;
use std::sync::Arc;

/// Shared entry point to the core
#[derive(Clone)]
pub struct RelayService {
    config: Arc<RelayConfig>,
    client: UpstreamClient,
    orchestrator: WorkflowOrchestrator,
}

impl RelayService {
    /// Create a service talking to the configured endpoint over `ureq`
    pub fn new(config: RelayConfig) -> Self {
        let client = UpstreamClient::new(Arc::new(config.provider.clone()));
        Self::with_client(config, client)
    }

    /// Create a service around a prepared client (custom transport, sleeper, policy)
    pub fn with_client(config: RelayConfig, client: UpstreamClient) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: WorkflowOrchestrator::new(client.clone()),
            client,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Reject when no credential is configured
    pub fn ensure_credential(&self) -> Result<()> {
        if self.config.provider.has_credential() {
            Ok(())
        } else {
            Err(ConfigError::MissingCredential.into())
        }
    }

    /// Single-shot completion with no system text
    pub fn complete(&self, prompt: &str) -> Result<String> {
        Ok(self.client.call(prompt, None)?)
    }

    /// Run the workflow named by (or inferred from) the request
    pub fn run_workflow(&self, request: &CompletionRequest) -> Result<WorkflowRun> {
        Ok(self
            .orchestrator
            .run(&request.prompt, request.workflow.as_deref())?)
    }
}
