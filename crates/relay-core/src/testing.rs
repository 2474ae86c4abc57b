//! Test doubles for the upstream seams
//!
//! Available to this crate's tests and, through the `testing` feature, to
//! downstream crates that want to drive the pipelines without a network.

use crate::llm::{HttpResponse, Sleeper, Transport, TransportError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

type Scripted = Result<HttpResponse, TransportError>;

/// A request seen by [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
    pub timeout: Duration,
}

/// Transport that replays canned responses in order
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    queue: Mutex<VecDeque<Scripted>>,
    /// Returned once the queue is drained
    fallback: Option<Scripted>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    /// Replay `responses` once each, then fail
    pub fn new(responses: Vec<Scripted>) -> Self {
        Self {
            queue: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    /// Return the same response for every request
    pub fn repeating(response: Scripted) -> Self {
        Self {
            fallback: Some(response),
            ..Self::default()
        }
    }

    /// Answer each request with the next text, wrapped in a 200 `output` envelope
    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|t| {
                    Ok(HttpResponse::new(
                        200,
                        serde_json::json!({ "output": t.as_ref() }).to_string(),
                    ))
                })
                .collect(),
        )
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Transport for ScriptedTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: body.clone(),
            timeout,
        });

        match self.queue.lock().pop_front() {
            Some(response) => response,
            None => self
                .fallback
                .clone()
                .unwrap_or_else(|| Err(TransportError("no scripted response left".to_string()))),
        }
    }
}

/// Sleeper that records requested delays instead of waiting
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
    }
}
