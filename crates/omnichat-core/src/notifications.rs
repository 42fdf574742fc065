//! Notifications that the OmniChat backend sends to any UI
//!
//! These notifications inform the UI about state changes in the backend.

use crate::llm::ReplyOutcome;
use crate::types::{Message, ProviderName, RequestId};
use serde::{Deserialize, Serialize};

/// Notifications that the backend sends to any UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// Active provider changed
    ProviderSelected { provider: ProviderName },

    /// A message was appended to the conversation
    MessageAppended { message: Message },

    /// A request was dispatched
    RequestStarted {
        request_id: RequestId,
        provider: ProviderName,
    },

    /// A request resolved and its reply was appended
    RequestFinished {
        request_id: RequestId,
        provider: ProviderName,
        outcome: ReplyOutcome,
    },

    /// A send was refused because a reply is still pending
    Busy { provider: ProviderName },

    /// Conversation and draft were emptied
    Cleared,

    /// Error message
    Error { message: String },
}

impl Notification {
    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Notification::Error {
            message: message.into(),
        }
    }
}
