//! Request payload dialects
//!
//! The upstream accepts one of two request shapes, chosen from the configured
//! endpoint URL:
//! - chat: OpenAI-compatible `messages` list (URL contains `/openai/`)
//! - completion: a single `input` text blob

use crate::config::ProviderConfig;
use serde::{Deserialize, Serialize};

/// Path marker identifying an OpenAI-compatible chat endpoint
pub const CHAT_PATH_MARKER: &str = "/openai/";

/// Sampling temperature sent with every request
pub const TEMPERATURE: f64 = 0.2;

/// Request/response shape convention of the upstream endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Chat,
    Completion,
}

impl Dialect {
    /// Pick the dialect for an endpoint URL
    pub fn from_endpoint(url: &str) -> Self {
        if url.contains(CHAT_PATH_MARKER) {
            Dialect::Chat
        } else {
            Dialect::Completion
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Chat => "chat",
            Dialect::Completion => "completion",
        }
    }
}

/// Message role in a chat payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// One entry of a chat payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Build the JSON body for one upstream call
pub fn build_payload(
    provider: &ProviderConfig,
    user_text: &str,
    system_text: Option<&str>,
) -> serde_json::Value {
    match Dialect::from_endpoint(&provider.api_url) {
        Dialect::Chat => {
            let mut messages = Vec::with_capacity(2);
            if let Some(system) = system_text.filter(|s| !s.is_empty()) {
                messages.push(ChatMessage::system(system));
            }
            messages.push(ChatMessage::user(user_text));

            serde_json::json!({
                "model": provider.model,
                "messages": messages,
                "max_tokens": provider.max_tokens,
                "temperature": TEMPERATURE
            })
        }
        Dialect::Completion => {
            let input = match system_text.filter(|s| !s.is_empty()) {
                Some(system) => format!("{}\n\n{}", system, user_text),
                None => user_text.to_string(),
            };

            serde_json::json!({
                "model": provider.model,
                "input": input,
                "max_output_tokens": provider.max_tokens,
                "temperature": TEMPERATURE
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn provider(url: &str) -> ProviderConfig {
        ProviderConfig {
            api_url: url.to_string(),
            model: "m".to_string(),
            max_tokens: 64,
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_dialect_detection() {
        assert_eq!(
            Dialect::from_endpoint("https://api.groq.com/openai/v1/chat/completions"),
            Dialect::Chat
        );
        assert_eq!(
            Dialect::from_endpoint("https://api.groq.ai/v1/generate"),
            Dialect::Completion
        );
    }

    #[test]
    fn test_chat_payload_puts_system_first() {
        let body = build_payload(
            &provider("https://x/openai/v1/chat/completions"),
            "hello",
            Some("be brief"),
        );

        assert_eq!(
            body,
            serde_json::json!({
                "model": "m",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ],
                "max_tokens": 64,
                "temperature": 0.2
            })
        );
    }

    #[test]
    fn test_chat_payload_without_system() {
        let body = build_payload(&provider("https://x/openai/v1"), "hello", None);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
    }

    #[test]
    fn test_completion_payload_joins_with_blank_line() {
        let body = build_payload(&provider("https://x/v1/generate"), "hello", Some("be brief"));

        assert_eq!(body["input"], "be brief\n\nhello");
        assert_eq!(body["max_output_tokens"], 64);
        assert_eq!(body["temperature"], 0.2);
        assert!(body.get("messages").is_none());
    }

    #[test]
    fn test_completion_payload_without_system() {
        let body = build_payload(&provider("https://x/v1/generate"), "hello", None);
        assert_eq!(body["input"], "hello");
    }
}
