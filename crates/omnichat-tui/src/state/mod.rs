//! TUI state management
//!
//! View-only state for the terminal UI.
//! Conversation state is owned by ChatService.

mod app;
mod focus;
mod input_mode;

pub use app::{AppState, MessageLevel, StatusMessage};
pub use focus::{FocusState, PanelId};
pub use input_mode::InputMode;
