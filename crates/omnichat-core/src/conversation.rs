//! Conversation state machine
//!
//! Holds the message log, the draft, the selected provider and the
//! request phase. Only one request may be in flight: a send while a
//! reply is pending is rejected, so replies always land in send order.

use crate::types::{Message, ProviderName, RequestId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A send that is waiting for its reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequest {
    pub id: RequestId,

    /// Provider captured at send time; the reply is attributed to it
    pub provider: ProviderName,

    /// Text that was sent
    pub message: String,
}

/// Request phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatPhase {
    /// No request in flight
    #[default]
    Idle,

    /// One send in progress
    AwaitingReply(PendingRequest),
}

impl ChatPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, ChatPhase::Idle)
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        match self {
            ChatPhase::Idle => None,
            ChatPhase::AwaitingReply(pending) => Some(pending),
        }
    }
}

/// Why a send did not start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("nothing to send")]
    EmptyDraft,

    #[error("still waiting for {0} to reply")]
    Busy(ProviderName),
}

/// Session-scoped conversation state
#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<Message>,
    draft: String,
    selected: ProviderName,
    phase: ChatPhase,
    next_request: u64,
}

impl ChatState {
    pub fn new(selected: ProviderName) -> Self {
        Self {
            messages: Vec::new(),
            draft: String::new(),
            selected,
            phase: ChatPhase::Idle,
            next_request: 1,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn selected(&self) -> ProviderName {
        self.selected
    }

    /// Change the active provider. A pending reply keeps its provider.
    pub fn select(&mut self, provider: ProviderName) {
        self.selected = provider;
    }

    pub fn phase(&self) -> &ChatPhase {
        &self.phase
    }

    pub fn is_awaiting_reply(&self) -> bool {
        !self.phase.is_idle()
    }

    /// Start a send cycle: `Idle -> AwaitingReply`.
    ///
    /// Appends the draft as a user message, clears the draft and returns
    /// the request to dispatch. An empty draft or a pending reply leaves
    /// the state untouched. Whitespace is sent as typed.
    pub fn begin_send(&mut self) -> Result<PendingRequest, SendError> {
        if self.draft.is_empty() {
            return Err(SendError::EmptyDraft);
        }
        if let Some(pending) = self.phase.pending() {
            return Err(SendError::Busy(pending.provider));
        }

        let message = std::mem::take(&mut self.draft);
        self.messages.push(Message::user(message.clone()));

        let pending = PendingRequest {
            id: RequestId(self.next_request),
            provider: self.selected,
            message,
        };
        self.next_request += 1;
        self.phase = ChatPhase::AwaitingReply(pending.clone());

        Ok(pending)
    }

    /// Finish a send cycle: `AwaitingReply -> Idle`.
    ///
    /// Returns the appended message, or `None` if `id` is not the pending
    /// request.
    pub fn complete(&mut self, id: RequestId, text: impl Into<String>) -> Option<&Message> {
        let provider = match &self.phase {
            ChatPhase::AwaitingReply(pending) if pending.id == id => pending.provider,
            _ => return None,
        };

        self.phase = ChatPhase::Idle;
        self.messages.push(Message::reply(provider, text));
        self.messages.last()
    }

    /// Empty the log and the draft. Does not touch the phase, so a pending
    /// reply still lands in the emptied log.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.draft.clear();
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(ProviderName::default())
    }
}
