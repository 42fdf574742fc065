//! Layout management for panel arrangement

use crate::state::PanelId;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the provider column; fits the longest name plus marker and borders
const PROVIDERS_WIDTH: u16 = 18;

/// Panel layout areas
///
/// ```text
/// +------------+------------------------------------+
/// |            |          Conversation              |
/// | Providers  |                                    |
/// |            +------------------------------------+
/// |            |          Draft input               |
/// +------------+------------------------------------+
/// | status bar                                      |
/// +-------------------------------------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppLayout {
    /// Left column: provider list
    pub providers: Rect,

    /// Center: conversation log
    pub conversation: Rect,

    /// Bottom of center: draft input
    pub input: Rect,

    /// Bottom row: status bar
    pub status: Rect,
}

/// Calculate layout areas for all panels
pub fn get_layout(area: Rect) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PROVIDERS_WIDTH), Constraint::Min(20)])
        .split(main_chunks[0]);

    // Input: borders + 1 line
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(h_chunks[1]);

    AppLayout {
        providers: h_chunks[0],
        conversation: v_chunks[0],
        input: v_chunks[1],
        status: main_chunks[1],
    }
}

impl AppLayout {
    /// Determine which panel contains the given coordinates
    pub fn panel_at(&self, x: u16, y: u16) -> Option<PanelId> {
        let pos = (x, y).into();
        if self.providers.contains(pos) {
            Some(PanelId::PROVIDERS)
        } else if self.conversation.contains(pos) {
            Some(PanelId::CONVERSATION)
        } else if self.input.contains(pos) {
            Some(PanelId::INPUT)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_layout_areas() {
        let layout = get_layout(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.providers, Rect::new(0, 0, 18, 23));
        assert_eq!(layout.conversation, Rect::new(18, 0, 62, 20));
        assert_eq!(layout.input, Rect::new(18, 20, 62, 3));
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_panel_at() {
        let layout = get_layout(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.panel_at(2, 2), Some(PanelId::PROVIDERS));
        assert_eq!(layout.panel_at(40, 5), Some(PanelId::CONVERSATION));
        assert_eq!(layout.panel_at(40, 21), Some(PanelId::INPUT));
        assert_eq!(layout.panel_at(40, 23), None);
    }
}
