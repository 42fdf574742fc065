//! Routes the selected provider to its adapter

use super::adapter::ProviderAdapter;
use super::error::FailureKind;
use super::transport::HttpTransport;
use super::{AnthropicVendor, GeminiVendor, OpenAiVendor};
use crate::config::{ChatConfig, Credentials};
use crate::types::{Message, ProviderName};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Reply text for providers without an adapter
pub const NOT_IMPLEMENTED_TEXT: &str = "Not implemented for this model yet.";

/// How a dispatch resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "snake_case")]
pub enum ReplyOutcome {
    /// The vendor answered
    Answered,

    /// The adapter failed; text is the vendor fallback
    Failed(FailureKind),

    /// No adapter for this provider; no request was made
    NotImplemented,

    /// The adapter call itself aborted
    Crashed,
}

/// Resolved reply for one dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub provider: ProviderName,
    pub text: String,
    pub outcome: ReplyOutcome,
}

impl Reply {
    pub fn not_implemented(provider: ProviderName) -> Self {
        Self {
            provider,
            text: NOT_IMPLEMENTED_TEXT.to_string(),
            outcome: ReplyOutcome::NotImplemented,
        }
    }

    /// Substitute used when the adapter call aborts instead of returning
    pub fn crashed(provider: ProviderName) -> Self {
        Self {
            provider,
            text: format!("Error with {} API.", provider),
            outcome: ReplyOutcome::Crashed,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.outcome == ReplyOutcome::Answered
    }

    /// Conversation entry for this reply
    pub fn to_message(&self) -> Message {
        Message::reply(self.provider, self.text.clone())
    }
}

/// Owns one adapter per implemented vendor
#[derive(Debug)]
pub struct Dispatcher {
    openai: ProviderAdapter,
    claude: ProviderAdapter,
    gemini: ProviderAdapter,
}

impl Dispatcher {
    /// Build with default vendor settings
    pub fn new(credentials: &Credentials, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            openai: ProviderAdapter::new(
                OpenAiVendor::new(),
                credentials.openai(),
                transport.clone(),
            ),
            claude: ProviderAdapter::new(
                AnthropicVendor::new(),
                credentials.anthropic(),
                transport.clone(),
            ),
            gemini: ProviderAdapter::new(GeminiVendor::new(), credentials.gemini(), transport),
        }
    }

    /// Build from configuration, honoring model and base URL overrides
    pub fn from_config(config: &ChatConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let credentials = config.credentials();
        let providers = &config.providers;

        let mut openai = OpenAiVendor::new();
        if let Some(url) = &providers.openai.base_url {
            openai = openai.with_base_url(url);
        }
        if let Some(model) = &providers.openai.model {
            openai = openai.with_model(model);
        }

        let mut claude = AnthropicVendor::new();
        if let Some(url) = &providers.anthropic.base_url {
            claude = claude.with_base_url(url);
        }
        if let Some(model) = &providers.anthropic.model {
            claude = claude.with_model(model);
        }

        let mut gemini = GeminiVendor::new();
        if let Some(url) = &providers.gemini.base_url {
            gemini = gemini.with_base_url(url);
        }
        if let Some(model) = &providers.gemini.model {
            gemini = gemini.with_model(model);
        }

        Self {
            openai: ProviderAdapter::new(openai, credentials.openai(), transport.clone()),
            claude: ProviderAdapter::new(claude, credentials.anthropic(), transport.clone()),
            gemini: ProviderAdapter::new(gemini, credentials.gemini(), transport),
        }
    }

    /// Adapter for a provider, if one exists
    pub fn adapter(&self, provider: ProviderName) -> Option<&ProviderAdapter> {
        match provider {
            ProviderName::ChatGpt => Some(&self.openai),
            ProviderName::Claude => Some(&self.claude),
            ProviderName::Gemini => Some(&self.gemini),
            ProviderName::Grok | ProviderName::Perplexity => None,
        }
    }

    /// Whether sending to this provider can succeed at all
    pub fn is_ready(&self, provider: ProviderName) -> bool {
        self.adapter(provider)
            .map(ProviderAdapter::has_credential)
            .unwrap_or(false)
    }

    /// Send `message` to `provider` and resolve to display text.
    ///
    /// Never fails: adapter errors become the vendor fallback text and
    /// unknown providers get [`NOT_IMPLEMENTED_TEXT`] without a request.
    pub fn dispatch(&self, provider: ProviderName, message: &str) -> Reply {
        let Some(adapter) = self.adapter(provider) else {
            return Reply::not_implemented(provider);
        };

        match adapter.send(message) {
            Ok(text) => Reply {
                provider,
                text,
                outcome: ReplyOutcome::Answered,
            },
            Err(err) => {
                tracing::debug!(%provider, kind = %err.kind(), "provider call failed");
                Reply {
                    provider,
                    text: adapter.fallback(),
                    outcome: ReplyOutcome::Failed(err.kind()),
                }
            }
        }
    }
}
