//! Configuration loader with environment variable expansion
//!
//! Loads configuration from an explicit path, `.omnichat.toml` in the
//! working directory, or the user config directory.

use super::types::{ChatConfig, VendorConfig};
use crate::types::ProviderName;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid expansion pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Environment variable lookup, injectable for tests
type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

const PROJECT_CONFIG: &str = ".omnichat.toml";

/// Load configuration from various sources
///
/// Priority order:
/// 1. `explicit` path (must exist)
/// 2. Project-level `.omnichat.toml`
/// 3. User-level `~/.config/omnichat/config.toml`
/// 4. Default configuration
///
/// Environment overrides are applied last in every case.
pub fn load_config(explicit: Option<&Path>, project_dir: &Path) -> Result<ChatConfig, ConfigError> {
    load_config_with(explicit, project_dir, user_config_path(), &|name: &str| {
        std::env::var(name).ok()
    })
}

fn load_config_with(
    explicit: Option<&Path>,
    project_dir: &Path,
    user_config: Option<PathBuf>,
    env: EnvLookup<'_>,
) -> Result<ChatConfig, ConfigError> {
    let config = if let Some(path) = explicit {
        load_from_file(path, env)?
    } else {
        let project_config = project_dir.join(PROJECT_CONFIG);
        if project_config.exists() {
            load_from_file(&project_config, env)?
        } else if let Some(user) = user_config.filter(|p| p.exists()) {
            load_from_file(&user, env)?
        } else {
            ChatConfig::default()
        }
    };

    let config = apply_env_overrides(config, env);
    tracing::debug!(
        default_provider = %config.default_provider,
        "configuration loaded"
    );
    Ok(config)
}

/// Get user config file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("omnichat").join("config.toml"))
}

/// Load configuration from a specific file
fn load_from_file(path: &Path, env: EnvLookup<'_>) -> Result<ChatConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: ChatConfig = toml::from_str(&content)?;

    expand_env_vars(&mut config, env)?;

    Ok(config)
}

/// Expand ${VAR} patterns in api keys and base URLs
fn expand_env_vars(config: &mut ChatConfig, env: EnvLookup<'_>) -> Result<(), ConfigError> {
    let env_regex = Regex::new(r"\$\{([^}]+)\}")?;

    let providers = &mut config.providers;
    for vendor in [
        &mut providers.openai,
        &mut providers.anthropic,
        &mut providers.gemini,
    ] {
        if let Some(ref api_key) = vendor.api_key {
            vendor.api_key = Some(expand_string(api_key, &env_regex, env));
        }
        if let Some(ref base_url) = vendor.base_url {
            vendor.base_url = Some(expand_string(base_url, &env_regex, env));
        }
    }

    Ok(())
}

/// Expand environment variables in a single string; unknown ones stay verbatim
fn expand_string(s: &str, regex: &Regex, env: EnvLookup<'_>) -> String {
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// First non-empty value among `names`
fn first_set(env: EnvLookup<'_>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|&name| env(name))
        .find(|value| !value.is_empty())
}

fn override_key(vendor: &mut VendorConfig, env: EnvLookup<'_>, names: &[&str]) {
    if let Some(key) = first_set(env, names) {
        vendor.api_key = Some(key);
    }
}

/// Apply environment variable overrides
///
/// Supports direct environment variables:
/// - OPENAI_API_KEY / VITE_OPENAI_API_KEY -> providers.openai.api_key
/// - ANTHROPIC_API_KEY / VITE_ANTHROPIC_API_KEY -> providers.anthropic.api_key
/// - GEMINI_API_KEY / VITE_GEMINI_API_KEY / GOOGLE_API_KEY -> providers.gemini.api_key
/// - OMNICHAT_DEFAULT_PROVIDER -> default_provider (unknown names are ignored)
fn apply_env_overrides(mut config: ChatConfig, env: EnvLookup<'_>) -> ChatConfig {
    override_key(
        &mut config.providers.openai,
        env,
        &["OPENAI_API_KEY", "VITE_OPENAI_API_KEY"],
    );
    override_key(
        &mut config.providers.anthropic,
        env,
        &["ANTHROPIC_API_KEY", "VITE_ANTHROPIC_API_KEY"],
    );
    override_key(
        &mut config.providers.gemini,
        env,
        &["GEMINI_API_KEY", "VITE_GEMINI_API_KEY", "GOOGLE_API_KEY"],
    );

    if let Some(name) = first_set(env, &["OMNICHAT_DEFAULT_PROVIDER"]) {
        match name.parse::<ProviderName>() {
            Ok(provider) => config.default_provider = provider.display_name().to_string(),
            Err(err) => tracing::warn!(
                configured = %config.default_provider,
                "ignoring OMNICHAT_DEFAULT_PROVIDER: {}",
                err
            ),
        }
    }

    config
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# OmniChat Configuration
# Place this file in your working directory as .omnichat.toml
# or in ~/.config/omnichat/config.toml for global settings

# Provider selected at startup: Gemini, Claude, ChatGPT, Grok (XAI), Perplexity
default_provider = "ChatGPT"

[providers.openai]
api_key = "${OPENAI_API_KEY}"
model = "gpt-3.5-turbo"

[providers.anthropic]
api_key = "${ANTHROPIC_API_KEY}"
model = "claude-3-opus-20240229"

[providers.gemini]
api_key = "${GEMINI_API_KEY}"
model = "gemini-pro"
"#
}
