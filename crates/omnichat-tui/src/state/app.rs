//! Central view state container

use super::{FocusState, InputMode};

/// Central application state
///
/// Panel-specific state lives in the panels themselves.
pub struct AppState {
    /// Current input mode
    pub input_mode: InputMode,

    /// Focus management
    pub focus: FocusState,

    /// Application should quit
    pub should_quit: bool,

    /// Status bar message (if any)
    pub status_message: Option<StatusMessage>,
}

/// Status bar message
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: MessageLevel,
}

/// Message severity level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create new application state, focused on the draft input in insert mode
    pub fn new() -> Self {
        Self {
            input_mode: InputMode::Insert,
            focus: FocusState::new(),
            should_quit: false,
            status_message: None,
        }
    }

    /// Request application quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set status message
    pub fn set_status(&mut self, text: impl Into<String>, level: MessageLevel) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            level,
        });
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageLevel::Info);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageLevel::Warning);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageLevel::Error);
    }
}
