//! Response normalization
//!
//! Upstream responses come in several envelopes. Each envelope has its own
//! extractor; they are tried in order and the first non-empty text wins.
//! When nothing matches, the raw body is returned verbatim.

use serde_json::{Map, Value};

/// Pulls text out of one response envelope
type Extractor = fn(&Map<String, Value>) -> Option<String>;

/// Extractors in priority order
const EXTRACTORS: &[(&str, Extractor)] = &[
    ("output", from_output),
    ("generations", from_generations),
    ("choices", from_choices),
    ("text", from_text),
];

/// Normalize an upstream response body into plain text
pub fn extract_text(body: &str) -> String {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    EXTRACTORS
        .iter()
        .find_map(|(name, extractor)| {
            extractor(&map).inspect(|_| tracing::trace!(envelope = name, "Extracted response text"))
        })
        .unwrap_or_else(|| body.to_string())
}

/// Non-empty string value
fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// `{"output": ["text", ...]}` or `{"output": "text"}`
fn from_output(map: &Map<String, Value>) -> Option<String> {
    match map.get("output")? {
        Value::Array(items) => non_empty(items.first()),
        value @ Value::String(_) => non_empty(Some(value)),
        _ => None,
    }
}

/// `{"generations": [{"text": ...}]}`, falling back to the entry's `output`
fn from_generations(map: &Map<String, Value>) -> Option<String> {
    let first = map.get("generations")?.as_array()?.first()?;
    non_empty(first.get("text")).or_else(|| non_empty(first.get("output")))
}

/// `{"choices": [{"message": {"content": ...}}]}` or `{"choices": [{"text": ...}]}`
fn from_choices(map: &Map<String, Value>) -> Option<String> {
    let first = map.get("choices")?.as_array()?.first()?;
    match first.get("message") {
        Some(Value::Object(message)) => non_empty(message.get("content")),
        message => non_empty(first.get("text")).or_else(|| non_empty(message)),
    }
}

/// `{"text": ...}`
fn from_text(map: &Map<String, Value>) -> Option<String> {
    non_empty(map.get("text"))
}
