//! Configuration types for OmniChat
//!
//! Defines the structure of `.omnichat.toml` configuration.

use crate::types::ProviderName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Provider selected at startup (display name or alias)
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Per-vendor settings
    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_provider() -> String {
    ProviderName::default().display_name().to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: ProvidersConfig::default(),
        }
    }
}

/// Settings for the three implemented vendors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: VendorConfig,

    #[serde(default)]
    pub anthropic: VendorConfig,

    #[serde(default)]
    pub gemini: VendorConfig,
}

/// Individual vendor configuration
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorConfig {
    /// API key (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model override
    #[serde(default)]
    pub model: Option<String>,

    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
}

impl fmt::Debug for VendorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ChatConfig {
    /// Provider selected at startup; unknown names fall back to ChatGPT
    pub fn default_provider(&self) -> ProviderName {
        self.default_provider.parse().unwrap_or_else(|err| {
            tracing::warn!("{}; using {}", err, ProviderName::default());
            ProviderName::default()
        })
    }

    /// Immutable credential set for the dispatcher
    pub fn credentials(&self) -> Credentials {
        let key = |cfg: &VendorConfig| cfg.api_key.clone().unwrap_or_default();
        Credentials::new(
            key(&self.providers.openai),
            key(&self.providers.anthropic),
            key(&self.providers.gemini),
        )
    }
}

/// Per-vendor secrets, read once at startup
///
/// Empty strings are allowed; the vendor rejects them at send time.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    openai: String,
    anthropic: String,
    gemini: String,
}

impl Credentials {
    pub fn new(
        openai: impl Into<String>,
        anthropic: impl Into<String>,
        gemini: impl Into<String>,
    ) -> Self {
        Self {
            openai: openai.into(),
            anthropic: anthropic.into(),
            gemini: gemini.into(),
        }
    }

    pub fn openai(&self) -> &str {
        &self.openai
    }

    pub fn anthropic(&self) -> &str {
        &self.anthropic
    }

    pub fn gemini(&self) -> &str {
        &self.gemini
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |s: &str| if s.is_empty() { "<empty>" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("openai", &mask(&self.openai))
            .field("anthropic", &mask(&self.anthropic))
            .field("gemini", &mask(&self.gemini))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.default_provider, "ChatGPT");
        assert_eq!(config.default_provider(), ProviderName::ChatGpt);
        assert_eq!(config.credentials(), Credentials::default());
    }

    #[test]
    fn test_unknown_default_provider_falls_back() {
        let config = ChatConfig {
            default_provider: "mistral".into(),
            ..ChatConfig::default()
        };
        assert_eq!(config.default_provider(), ProviderName::ChatGpt);
    }

    #[test]
    fn test_credentials_from_config() {
        let mut config = ChatConfig::default();
        config.providers.openai.api_key = Some("sk-1".into());
        config.providers.gemini.api_key = Some("AIza".into());

        let creds = config.credentials();
        assert_eq!(creds.openai(), "sk-1");
        assert_eq!(creds.anthropic(), "");
        assert_eq!(creds.gemini(), "AIza");
    }

    #[test]
    fn test_debug_never_shows_secrets() {
        let creds = Credentials::new("sk-secret", "", "AIza-secret");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<empty>"));

        let vendor = VendorConfig {
            api_key: Some("sk-secret".into()),
            ..VendorConfig::default()
        };
        assert!(!format!("{:?}", vendor).contains("sk-secret"));
    }

    #[test]
    fn test_partial_toml() {
        let config: ChatConfig = toml::from_str(
            r#"
            [providers.gemini]
            model = "gemini-1.5-flash"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_provider, "ChatGPT");
        assert_eq!(config.providers.gemini.model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(config.providers.openai, VendorConfig::default());
    }
}
