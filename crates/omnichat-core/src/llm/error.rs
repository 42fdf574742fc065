//! LLM error types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for a single provider call
#[derive(Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network/connection error
    Connection(String),

    /// Non-success HTTP status
    Api { status: u16, message: String },

    /// Rate limited (429)
    RateLimited,

    /// Body was not JSON, or the reply field was missing
    MalformedResponse(String),
}

/// Coarse failure category, safe to log and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Status,
    Shape,
}

impl LlmError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LlmError::Connection(_) => FailureKind::Transport,
            LlmError::Api { .. } | LlmError::RateLimited => FailureKind::Status,
            LlmError::MalformedResponse(_) => FailureKind::Shape,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Status => write!(f, "status"),
            FailureKind::Shape => write!(f, "shape"),
        }
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Connection(msg) => write!(f, "Connection error: {}", msg),
            LlmError::Api { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            LlmError::RateLimited => write!(f, "Rate limited"),
            LlmError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<ureq::Error> for LlmError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response.into_string().unwrap_or_else(|_| "Unknown error".to_string());
                if status == 429 {
                    LlmError::RateLimited
                } else if status == 401 || status == 403 {
                    LlmError::Api {
                        status,
                        message: "Authentication failed".to_string(),
                    }
                } else {
                    LlmError::Api { status, message }
                }
            }
            // The transport's own Display includes the URL, which carries
            // the Gemini key in its query string.
            ureq::Error::Transport(transport) => {
                let detail = transport.message().unwrap_or_default();
                if detail.is_empty() {
                    LlmError::Connection(transport.kind().to_string())
                } else {
                    LlmError::Connection(format!("{}: {}", transport.kind(), detail))
                }
            }
        }
    }
}

impl From<std::io::Error> for LlmError {
    fn from(err: std::io::Error) -> Self {
        LlmError::MalformedResponse(err.to_string())
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::MalformedResponse(format!("JSON error: {}", err))
    }
}
