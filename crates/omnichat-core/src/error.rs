//! Error types for OmniChat Core
//!
//! Provides a unified error type for all backend operations.

use thiserror::Error;

/// Result type for OmniChat Core operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Unified error type for OmniChat Core
#[derive(Error, Debug)]
pub enum ChatError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl ChatError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }

    /// Create an invalid operation error
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        ChatError::InvalidOperation(msg.into())
    }
}

impl From<crate::config::ConfigError> for ChatError {
    fn from(err: crate::config::ConfigError) -> Self {
        ChatError::Config(err.to_string())
    }
}
