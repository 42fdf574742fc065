//! OmniChat Core - Backend library for OmniChat
//!
//! This crate provides the UI-agnostic backend functionality:
//! - Provider adapters for ChatGPT, Claude and Gemini
//! - Dispatch from the selected provider to its adapter
//! - Conversation state with a single in-flight request
//! - Configuration loading
//!
//! Any UI can consume this crate through the `ChatService` interface.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   Command     ┌──────────────────┐
//! │   Any UI          │ ─────────────→│  omnichat-core   │
//! │   (TUI)           │               │   ChatService    │
//! │                   │ ←─────────────│                  │
//! └───────────────────┘  Notification └──────────────────┘
//! ```

// Public API modules
pub mod commands;
pub mod error;
pub mod notifications;
pub mod types;

pub mod config;
pub mod conversation;

// Internal event system (worker threads -> service)
pub(crate) mod events;

// LLM provider system
pub mod llm;

// Main service facade
pub mod service;

// Re-export commonly used types
pub use commands::Command;
pub use config::{load_config, ChatConfig, ConfigError, Credentials};
pub use conversation::{ChatPhase, ChatState, PendingRequest, SendError};
pub use error::{ChatError, Result};
pub use notifications::Notification;
pub use service::ChatService;
pub use types::{Message, ProviderName, RequestId, Sender};

// Re-export LLM types
pub use llm::{
    Dispatcher, FailureKind, HttpTransport, LlmError, ProviderAdapter, Reply, ReplyOutcome,
    ScriptedTransport, UreqTransport, NOT_IMPLEMENTED_TEXT,
};

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
