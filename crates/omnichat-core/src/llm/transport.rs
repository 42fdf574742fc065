//! HTTP transport seam for provider adapters
//!
//! Adapters never talk to `ureq` directly. They hand a fully built
//! request to an [`HttpTransport`], which lets the same adapter run
//! against the network or against a scripted transport.

use super::LlmError;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// A request header as (name, value)
pub type Header = (&'static str, String);

/// Blocking JSON-over-HTTP POST
pub trait HttpTransport: Send + Sync {
    /// POST `body` as JSON and return the parsed JSON response.
    ///
    /// Non-2xx statuses, transport failures and non-JSON bodies are errors.
    fn post_json(&self, url: &str, headers: &[Header], body: &Value) -> Result<Value, LlmError>;
}

/// Production transport backed by a shared `ureq` agent
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn post_json(&self, url: &str, headers: &[Header], body: &Value) -> Result<Value, LlmError> {
        let mut request = self.agent.post(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let response = request.send_json(body)?;
        let json: Value = response.into_json()?;
        Ok(json)
    }
}

/// A request captured by [`ScriptedTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Value,
}

impl RecordedRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that replays canned responses and records every call
///
/// Responses are consumed in order. Once the script runs out, every call
/// fails with a connection error.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, LlmError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response
    pub fn with_json(self, value: Value) -> Self {
        self.responses.lock().push_back(Ok(value));
        self
    }

    /// Queue a failure
    pub fn with_error(self, error: LlmError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Number of requests issued so far
    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// Snapshot of all recorded requests
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }
}

impl HttpTransport for ScriptedTransport {
    fn post_json(&self, url: &str, headers: &[Header], body: &Value) -> Result<Value, LlmError> {
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
            body: body.clone(),
        });

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Connection("no scripted response".to_string())))
    }
}
