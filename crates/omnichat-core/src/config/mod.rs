//! Configuration module for OmniChat
//!
//! Handles loading and parsing of `.omnichat.toml` configuration files
//! with support for environment variable expansion.

mod loader;
mod types;

pub use loader::{load_config, sample_config, user_config_path, ConfigError};
pub use types::{ChatConfig, Credentials, ProvidersConfig, VendorConfig};
