//! Upstream client
//!
//! Builds the dialect-specific payload, POSTs it with retry/backoff and
//! normalizes whatever envelope comes back into plain text.

use super::{
    build_payload, extract_text, Dialect, RetryPolicy, SharedSleeper, SharedTransport,
    ThreadSleeper, UpstreamError, UreqTransport,
};
use crate::config::ProviderConfig;
use std::sync::Arc;

/// Client for the single configured upstream LLM endpoint
#[derive(Clone)]
pub struct UpstreamClient {
    /// Endpoint, credential, model and limits
    provider: Arc<ProviderConfig>,

    /// HTTP transport
    transport: SharedTransport,

    /// Backoff suspension
    sleeper: SharedSleeper,

    /// Attempt budget and backoff curve
    policy: RetryPolicy,
}

impl UpstreamClient {
    /// Create a client with the default `ureq` transport
    pub fn new(provider: Arc<ProviderConfig>) -> Self {
        Self {
            provider,
            transport: Arc::new(UreqTransport::new()),
            sleeper: Arc::new(ThreadSleeper),
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the HTTP transport
    pub fn with_transport(mut self, transport: SharedTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the sleeper used between attempts
    pub fn with_sleeper(mut self, sleeper: SharedSleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replace the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    pub fn dialect(&self) -> Dialect {
        Dialect::from_endpoint(&self.provider.api_url)
    }

    /// Send one prompt upstream and return the normalized text
    pub fn call(&self, user_text: &str, system_text: Option<&str>) -> Result<String, UpstreamError> {
        // The credential policy belongs to the boundary; keep going so mocked
        // transports still work without a key.
        if !self.provider.has_credential() {
            tracing::warn!("GROQ_API_KEY not configured; sending upstream request without credential");
        }

        let headers = [
            (
                "Authorization",
                format!("Bearer {}", self.provider.api_key.as_deref().unwrap_or_default()),
            ),
            ("Content-Type", "application/json".to_string()),
        ];
        let payload = build_payload(&self.provider, user_text, system_text);
        let timeout = self.provider.timeout();

        let mut attempt = 1;
        loop {
            tracing::debug!(
                attempt,
                dialect = self.dialect().as_str(),
                url = %self.provider.api_url,
                "Upstream request"
            );

            let failure = match self
                .transport
                .post_json(&self.provider.api_url, &headers, &payload, timeout)
            {
                Ok(response) if response.status == 200 => {
                    return Ok(extract_text(&response.body));
                }
                Ok(response) if is_transient(response.status) => UpstreamError::Transient {
                    status: response.status,
                    body: response.body,
                },
                Ok(response) => {
                    let err = UpstreamError::Protocol {
                        status: response.status,
                        body: response.body,
                    };
                    tracing::error!(status = response.status, "Upstream rejected request");
                    return Err(err);
                }
                Err(err) => err.into(),
            };

            if !self.policy.has_remaining(attempt) {
                tracing::error!(attempt, kind = failure.kind(), "Upstream retries exhausted");
                return Err(failure);
            }

            let delay = self.policy.delay(attempt);
            tracing::warn!(
                attempt,
                kind = failure.kind(),
                delay_ms = delay.as_millis() as u64,
                "Upstream call failed, backing off: {}",
                failure
            );
            self.sleeper.sleep(delay);
            attempt += 1;
        }
    }
}

/// Rate limit or server error
fn is_transient(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}
