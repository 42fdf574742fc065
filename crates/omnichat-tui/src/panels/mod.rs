//! Panel system with trait-based composition
//!
//! Each panel implements the Panel trait for consistent behavior.
//! Panels never touch ChatService directly; they queue Commands that
//! the app forwards.

mod conversation;
mod input;
mod providers;

pub use conversation::ConversationPanel;
pub use input::InputPanel;
pub use providers::ProvidersPanel;

use crate::events::TuiEvent;
use crate::state::{AppState, PanelId};
use omnichat_core::Result;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::Frame;

/// Panel trait - defines the interface for all panels
pub trait Panel: Send {
    /// Get the panel's unique identifier
    fn id(&self) -> PanelId;

    /// Get the panel's display name
    fn name(&self) -> &str;

    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &TuiEvent, state: &mut AppState) -> Result<bool>;

    /// Render the panel to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    /// Called when the panel area is resized
    fn on_resize(&mut self, _cols: u16, _rows: u16) {}
}

/// Border style shared by all panels
pub(crate) fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Whether a mouse position falls inside an area
pub(crate) fn contains(area: Rect, column: u16, row: u16) -> bool {
    area.contains((column, row).into())
}
