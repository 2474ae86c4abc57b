//! Configuration module for Relay
//!
//! Handles loading `.relay.toml` files with `${VAR}` expansion and the
//! environment variables the service has always honored (`GROQ_*`,
//! `ALLOW_ORIGINS`, `LOG_LEVEL`, ...).

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, load_config, load_from_file, normalize_log_level, parse_origins, sample_config,
    ConfigError,
};
pub use types::{
    ProviderConfig, RelayConfig, ServerConfig, DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_ORIGINS,
};
