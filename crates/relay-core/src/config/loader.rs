//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.relay.toml` in the project root or the user
//! config directory, then applies environment overrides.

use super::types::RelayConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("GROQ_API_KEY not configured on server")]
    MissingCredential,
}

/// Load configuration from various sources
///
/// Priority order:
/// 1. Project-level `.relay.toml`
/// 2. User-level `~/.config/relay/config.toml`
/// 3. Default configuration
///
/// Environment variables override whichever of these was found.
pub fn load_config(project_dir: &Path) -> Result<RelayConfig, ConfigError> {
    let project_config = project_dir.join(".relay.toml");

    let config = if project_config.exists() {
        load_from_file(&project_config)?
    } else {
        match get_user_config_path().filter(|p| p.exists()) {
            Some(user_config) => load_from_file(&user_config)?,
            None => RelayConfig::default(),
        }
    };

    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Get user config directory path
fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("relay").join("config.toml"))
}

/// Load configuration from a specific file
pub fn load_from_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: RelayConfig = toml::from_str(&content)?;

    expand_env_vars(&mut config);
    tracing::debug!(path = %path.display(), "Loaded config file");

    Ok(config)
}

fn env_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern compiles"))
}

/// Expand ${VAR} patterns in string values
fn expand_env_vars(config: &mut RelayConfig) {
    let regex = env_pattern();
    let provider = &mut config.provider;

    // A key that still holds a placeholder was never configured
    provider.api_key = provider
        .api_key
        .as_deref()
        .map(|key| expand_string(key, regex))
        .filter(|key| !regex.is_match(key));
    provider.api_url = expand_string(&provider.api_url, regex);
    provider.model = expand_string(&provider.model, regex);
}

/// Expand environment variables in a single string
fn expand_string(s: &str, regex: &Regex) -> String {
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Apply environment variable overrides
///
/// Supported variables:
/// - GROQ_API_KEY, GROQ_API_URL, GROQ_MODEL -> provider
/// - GROQ_TIMEOUT (seconds), GROQ_MAX_TOKENS -> provider limits
/// - ALLOW_ORIGINS (comma-separated) -> replaces the allowed origins
/// - FRONTEND_URL -> added to the allowed origins when ALLOW_ORIGINS is unset
/// - LOG_LEVEL, RELAY_HOST, PORT -> server
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: RelayConfig, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(key) = get("GROQ_API_KEY") {
        config.provider.api_key = Some(key);
    }
    if let Some(url) = get("GROQ_API_URL") {
        config.provider.api_url = url;
    }
    if let Some(model) = get("GROQ_MODEL") {
        config.provider.model = model;
    }
    if let Some(timeout) = get("GROQ_TIMEOUT") {
        config.provider.timeout_secs = parse_value("GROQ_TIMEOUT", &timeout)?;
    }
    if let Some(max_tokens) = get("GROQ_MAX_TOKENS") {
        config.provider.max_tokens = parse_value("GROQ_MAX_TOKENS", &max_tokens)?;
    }

    if let Some(origins) = get("ALLOW_ORIGINS") {
        config.server.allow_origins = parse_origins(&origins);
    } else if let Some(frontend) = get("FRONTEND_URL") {
        if !config.server.allow_origins.contains(&frontend) {
            config.server.allow_origins.push(frontend);
        }
    }

    if let Some(level) = get("LOG_LEVEL") {
        config.server.log_level = normalize_log_level(&level);
    }
    if let Some(host) = get("RELAY_HOST") {
        config.server.host = host;
    }
    if let Some(port) = get("PORT") {
        config.server.port = parse_value("PORT", &port)?;
    }

    Ok(config)
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Map a log level name onto a tracing level
///
/// Accepts the Python logging names too (`WARNING`, `CRITICAL`, `FATAL`, `NOTSET`).
pub fn normalize_log_level(level: &str) -> String {
    let level = level.trim().to_lowercase();
    match level.as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "notset" => "trace".to_string(),
        _ => level,
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Relay Configuration
# Place this file in your project root as .relay.toml
# or in ~/.config/relay/config.toml for global settings.
# Environment variables (GROQ_API_KEY, GROQ_API_URL, ...) override these values.

[provider]
api_key = "${GROQ_API_KEY}"

# URLs containing /openai/ use the chat payload, anything else the completion payload
api_url = "https://api.groq.ai/v1/generate"
model = "groq-1"

# Request timeout in seconds
timeout = 30
max_tokens = 256

[server]
host = "0.0.0.0"
port = 8000
allow_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]
log_level = "info"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ORIGINS;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.provider.api_url, "https://api.groq.ai/v1/generate");
        assert_eq!(config.provider.model, "groq-1");
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.provider.max_tokens, 256);
        assert!(!config.provider.has_credential());
        assert_eq!(config.server.allow_origins, DEFAULT_ORIGINS);
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env_overrides(
            RelayConfig::default(),
            env(&[
                ("GROQ_API_KEY", "secret"),
                ("GROQ_API_URL", "https://api.groq.com/openai/v1/chat/completions"),
                ("GROQ_MODEL", "llama"),
                ("GROQ_TIMEOUT", "5"),
                ("GROQ_MAX_TOKENS", "512"),
                ("LOG_LEVEL", "DEBUG"),
                ("PORT", "9000"),
            ]),
        )
        .unwrap();

        assert_eq!(config.provider.api_key.as_deref(), Some("secret"));
        assert!(config.provider.has_credential());
        assert_eq!(config.provider.model, "llama");
        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.provider.max_tokens, 512);
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let config =
            apply_env_overrides(RelayConfig::default(), env(&[("GROQ_API_KEY", "  ")])).unwrap();
        assert_eq!(config.provider.api_key, None);
    }

    #[test]
    fn test_invalid_number() {
        let err = apply_env_overrides(RelayConfig::default(), env(&[("GROQ_TIMEOUT", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "GROQ_TIMEOUT"));
    }

    #[test]
    fn test_allow_origins_replaces_defaults() {
        let config = apply_env_overrides(
            RelayConfig::default(),
            env(&[
                ("ALLOW_ORIGINS", "https://a.dev, ,https://b.dev"),
                ("FRONTEND_URL", "https://ignored.dev"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server.allow_origins, vec!["https://a.dev", "https://b.dev"]);
    }

    #[test]
    fn test_frontend_url_extends_defaults() {
        let config =
            apply_env_overrides(RelayConfig::default(), env(&[("FRONTEND_URL", "https://app.dev")]))
                .unwrap();
        assert_eq!(config.server.allow_origins.len(), DEFAULT_ORIGINS.len() + 1);
        assert_eq!(config.server.allow_origins.last().unwrap(), "https://app.dev");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".relay.toml");
        std::fs::write(
            &path,
            r#"
[provider]
api_url = "https://api.groq.com/openai/v1/chat/completions"
max_tokens = 100

[server]
port = 8123
"#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.provider.max_tokens, 100);
        assert_eq!(config.provider.model, "groq-1");
        assert_eq!(config.server.port, 8123);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_sample_config_parses() {
        let config: RelayConfig = toml::from_str(sample_config()).unwrap();
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_python_log_levels_map_to_tracing() {
        for (raw, expected) in [("WARNING", "warn"), ("CRITICAL", "error"), ("Info", "info")] {
            let config =
                apply_env_overrides(RelayConfig::default(), env(&[("LOG_LEVEL", raw)])).unwrap();
            assert_eq!(config.server.log_level, expected);
        }
    }

    #[test]
    fn test_unresolved_api_key_is_absent() {
        std::env::remove_var("GROQ_API_KEY");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".relay.toml");
        std::fs::write(&path, sample_config()).unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.provider.api_key, None);
        assert!(!config.provider.has_credential());
    }

    #[test]
    fn test_expand_env_var() {
        let regex = env_pattern();
        std::env::set_var("RELAY_TEST_VAR", "test_value");
        let result = expand_string("prefix_${RELAY_TEST_VAR}_suffix", regex);
        assert_eq!(result, "prefix_test_value_suffix");
        std::env::remove_var("RELAY_TEST_VAR");
    }

    #[test]
    fn test_missing_env_var() {
        let result = expand_string("${RELAY_NONEXISTENT_VAR}", env_pattern());
        assert_eq!(result, "${RELAY_NONEXISTENT_VAR}");
    }
}
