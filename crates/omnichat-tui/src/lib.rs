//! OmniChat TUI - Terminal User Interface for OmniChat
//!
//! This crate provides the Ratatui-based terminal interface.
//! It consumes the omnichat-core crate for backend functionality.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   Command     ┌──────────────────┐
//! │   omnichat-tui    │ ─────────────→│  omnichat-core   │
//! │   TuiApp          │               │   ChatService    │
//! │                   │ ←─────────────│                  │
//! └───────────────────┘  Notification └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - `events` - TUI-specific events (keyboard, mouse, resize)
//! - `state` - TUI state (focus, input mode, status bar)
//! - `panels` - provider selector, conversation log, draft input
//! - `ui` - layout

pub mod app;
pub mod events;
pub mod panels;
pub mod state;
pub mod ui;

// Re-export key types
pub use app::TuiApp;
pub use events::TuiEvent;
pub use state::{AppState, FocusState, InputMode, PanelId};

// Re-export omnichat-core types for convenience
pub use omnichat_core::{ChatConfig, ChatService, Command, Notification, ProviderName, Result};

/// Get the TUI crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
