//! Core types shared by the backend and any UI
//!
//! These types are serializable so a UI can mirror them without
//! depending on backend internals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selectable language-model provider
///
/// The order of [`ProviderName::ALL`] is the order shown in the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderName {
    #[serde(rename = "Gemini")]
    Gemini,

    #[serde(rename = "Claude")]
    Claude,

    #[serde(rename = "ChatGPT")]
    ChatGpt,

    #[serde(rename = "Grok (XAI)")]
    Grok,

    #[serde(rename = "Perplexity")]
    Perplexity,
}

impl ProviderName {
    /// All providers in selector order
    pub const ALL: [ProviderName; 5] = [
        ProviderName::Gemini,
        ProviderName::Claude,
        ProviderName::ChatGpt,
        ProviderName::Grok,
        ProviderName::Perplexity,
    ];

    /// Human-readable name, also used as the reply label
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderName::Gemini => "Gemini",
            ProviderName::Claude => "Claude",
            ProviderName::ChatGpt => "ChatGPT",
            ProviderName::Grok => "Grok (XAI)",
            ProviderName::Perplexity => "Perplexity",
        }
    }

    /// Whether a vendor adapter exists for this provider
    pub fn has_adapter(&self) -> bool {
        matches!(
            self,
            ProviderName::Gemini | ProviderName::Claude | ProviderName::ChatGpt
        )
    }

    /// Position in [`ProviderName::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

impl Default for ProviderName {
    fn default() -> Self {
        ProviderName::ChatGpt
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when a provider name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown provider '{0}' (expected one of: Gemini, Claude, ChatGPT, Grok (XAI), Perplexity)")]
pub struct ParseProviderError(pub String);

impl FromStr for ProviderName {
    type Err = ParseProviderError;

    /// Accepts display names case-insensitively, plus vendor aliases
    /// such as `openai`, `anthropic`, `grok` and `xai`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let provider = match normalized.as_str() {
            "gemini" | "google" => ProviderName::Gemini,
            "claude" | "anthropic" => ProviderName::Claude,
            "chatgpt" | "openai" | "gpt" => ProviderName::ChatGpt,
            "grok (xai)" | "grok" | "xai" => ProviderName::Grok,
            "perplexity" => ProviderName::Perplexity,
            _ => return Err(ParseProviderError(s.to_string())),
        };
        Ok(provider)
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "provider")]
pub enum Sender {
    User,
    Provider(ProviderName),
}

impl Sender {
    /// Label shown in front of the message text
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Provider(provider) => provider.display_name(),
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Sender::User)
    }
}

/// A single conversation entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    /// Message typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    /// Reply attributed to a provider
    pub fn reply(provider: ProviderName, text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Provider(provider),
            text: text.into(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Monotonic identifier of one send cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_selector_order_and_names() {
        let names: Vec<&str> = ProviderName::ALL.iter().map(|p| p.display_name()).collect();
        assert_eq!(
            names,
            vec!["Gemini", "Claude", "ChatGPT", "Grok (XAI)", "Perplexity"]
        );
    }

    #[test]
    fn test_default_provider_is_chatgpt() {
        assert_eq!(ProviderName::default(), ProviderName::ChatGpt);
    }

    #[test]
    fn test_has_adapter() {
        assert!(ProviderName::ChatGpt.has_adapter());
        assert!(ProviderName::Claude.has_adapter());
        assert!(ProviderName::Gemini.has_adapter());
        assert!(!ProviderName::Grok.has_adapter());
        assert!(!ProviderName::Perplexity.has_adapter());
    }

    #[test]
    fn test_parse_display_names_and_aliases() {
        assert_eq!("Grok (XAI)".parse::<ProviderName>(), Ok(ProviderName::Grok));
        assert_eq!("chatgpt".parse::<ProviderName>(), Ok(ProviderName::ChatGpt));
        assert_eq!("openai".parse::<ProviderName>(), Ok(ProviderName::ChatGpt));
        assert_eq!(" Anthropic ".parse::<ProviderName>(), Ok(ProviderName::Claude));
        assert!("mistral".parse::<ProviderName>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&ProviderName::Grok).unwrap();
        assert_eq!(json, "\"Grok (XAI)\"");
        let back: ProviderName = serde_json::from_str("\"ChatGPT\"").unwrap();
        assert_eq!(back, ProviderName::ChatGpt);
    }

    #[test]
    fn test_sender_labels() {
        assert_eq!(Sender::User.label(), "You");
        assert_eq!(Sender::Provider(ProviderName::Claude).label(), "Claude");
    }

    #[test]
    fn test_index_matches_all() {
        for (i, provider) in ProviderName::ALL.iter().enumerate() {
            assert_eq!(provider.index(), i);
        }
    }
}
