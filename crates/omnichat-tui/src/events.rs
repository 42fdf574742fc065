//! TUI event system
//!
//! UI-specific events handed to panels. Backend changes arrive
//! separately as Notifications from ChatService.

use crossterm::event::{Event, KeyEvent, MouseEvent};

/// TUI-specific events
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event with new dimensions (width, height)
    Resize(u16, u16),
}

impl TuiEvent {
    /// Convert a raw terminal event; focus and paste events are dropped
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Some(TuiEvent::Key(key)),
            Event::Mouse(mouse) => Some(TuiEvent::Mouse(mouse)),
            Event::Resize(cols, rows) => Some(TuiEvent::Resize(cols, rows)),
            _ => None,
        }
    }
}
