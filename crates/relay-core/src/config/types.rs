//! Configuration types
//!
//! Built once at startup and shared read-only for the life of the process.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default upstream endpoint (completion dialect)
pub const DEFAULT_API_URL: &str = "https://api.groq.ai/v1/generate";

/// Default upstream model
pub const DEFAULT_MODEL: &str = "groq-1";

/// Development origins allowed when nothing else is configured
pub const DEFAULT_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Upstream LLM provider
    pub provider: ProviderConfig,

    /// HTTP server
    pub server: ServerConfig,
}

/// Upstream provider settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Bearer credential; requests are still attempted without one
    pub api_key: Option<String>,

    /// Endpoint URL; its path also selects the payload dialect
    pub api_url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Per-request network timeout in seconds
    #[serde(rename = "timeout")]
    pub timeout_secs: u64,

    /// Maximum output tokens requested
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 30,
            max_tokens: 256,
        }
    }
}

impl ProviderConfig {
    /// Whether a non-empty credential is configured
    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Keep the credential out of logs
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Origins allowed to make cross-origin requests (`*` allows any)
    pub allow_origins: Vec<String>,

    /// Log verbosity (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allow_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            log_level: "info".to_string(),
        }
    }
}
