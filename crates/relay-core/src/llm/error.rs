//! Upstream error types

use std::fmt;

/// Error type for calls to the upstream LLM provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Rate limit (429) or server error (5xx) that survived every retry
    Transient { status: u16, body: String },

    /// Any other non-200 status; never retried
    Protocol { status: u16, body: String },

    /// Connection, DNS, timeout or body read failure that survived every retry
    Network(String),
}

impl UpstreamError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Transient { status, .. } | UpstreamError::Protocol { status, .. } => {
                Some(*status)
            }
            UpstreamError::Network(_) => None,
        }
    }

    /// Short classification used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transient { .. } => "transient",
            UpstreamError::Protocol { .. } => "protocol",
            UpstreamError::Network(_) => "network",
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Transient { status, body } => {
                write!(f, "Transient upstream error: {} {}", status, body)
            }
            UpstreamError::Protocol { status, body } => {
                write!(f, "Upstream API error: {} {}", status, body)
            }
            UpstreamError::Network(msg) => write!(f, "Upstream network error: {}", msg),
        }
    }
}

impl std::error::Error for UpstreamError {}

/// Failure below the HTTP status level, reported by a [`Transport`](super::Transport)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

impl From<ureq::Transport> for TransportError {
    fn from(err: ureq::Transport) -> Self {
        TransportError(err.to_string())
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError(err.to_string())
    }
}

impl From<TransportError> for UpstreamError {
    fn from(err: TransportError) -> Self {
        UpstreamError::Network(err.0)
    }
}
