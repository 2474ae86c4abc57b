//! Upstream LLM integration
//!
//! A single upstream endpoint, spoken to in one of two dialects:
//! - chat: OpenAI-compatible `messages` payload
//! - completion: single `input` payload
//!
//! Responses are normalized across the known envelopes, and rate limits,
//! server errors and network failures are retried with exponential backoff.

mod client;
mod error;
mod extract;
mod payload;
mod retry;
mod transport;

pub use client::UpstreamClient;
pub use error::{TransportError, UpstreamError};
pub use extract::extract_text;
pub use payload::{build_payload, ChatMessage, Dialect, MessageRole, CHAT_PATH_MARKER, TEMPERATURE};
pub use retry::{RetryPolicy, SharedSleeper, Sleeper, ThreadSleeper};
pub use transport::{HttpResponse, SharedTransport, Transport, UreqTransport};
