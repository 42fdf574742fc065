//! Commands that any UI can send to the OmniChat backend
//!
//! These commands represent every user intent the view forwards.

use crate::types::ProviderName;
use serde::{Deserialize, Serialize};

/// Commands that any UI can send to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Make a provider the active one
    SelectProvider { provider: ProviderName },

    /// Replace the draft text
    SetDraft { text: String },

    /// Send the current draft to the active provider
    ///
    /// Ignored when the draft is blank; rejected while a reply is pending.
    SendDraft,

    /// Empty the conversation and the draft
    ///
    /// Does not cancel a pending request.
    Clear,

    /// Shut down the backend
    Shutdown,
}

impl Command {
    /// Create a SelectProvider command
    pub fn select(provider: ProviderName) -> Self {
        Command::SelectProvider { provider }
    }

    /// Create a SetDraft command
    pub fn set_draft(text: impl Into<String>) -> Self {
        Command::SetDraft { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serialization() {
        let cmd = Command::select(ProviderName::Grok);
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"type":"SelectProvider","provider":"Grok (XAI)"}"#);

        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_unit_command_serialization() {
        let json = serde_json::to_string(&Command::SendDraft).unwrap();
        assert_eq!(json, r#"{"type":"SendDraft"}"#);
    }
}
