//! HTTP transport seam for the upstream client
//!
//! The client only needs "POST this JSON, give me status and body". Keeping
//! that behind a trait lets tests script responses without a network.

use super::TransportError;
use std::sync::Arc;
use std::time::Duration;

/// Raw upstream response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Something that can POST a JSON body and hand back the response
///
/// Non-2xx statuses are NOT errors at this level; they come back as an
/// [`HttpResponse`] so the retry policy can classify them. Only failures that
/// produce no status at all are reported as [`TransportError`].
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;
}

/// Thread-safe shared transport
pub type SharedTransport = Arc<dyn Transport>;

/// Blocking transport backed by a `ureq` agent
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.post(url).timeout(timeout);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = match request.send_json(body) {
            Ok(response) => response,
            // ureq reports 4xx/5xx as errors; hand them back as data
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => return Err(transport.into()),
        };

        let status = response.status();
        let body = response.into_string()?;
        Ok(HttpResponse { status, body })
    }
}
