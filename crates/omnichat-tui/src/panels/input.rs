//! Draft input panel

use super::{border_style, Panel};
use crate::events::TuiEvent;
use crate::state::{AppState, PanelId};
use omnichat_core::{Command, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = "> ";

/// Single-line draft editor
pub struct InputPanel {
    /// Draft text
    buffer: String,

    /// Cursor position as a byte offset on a char boundary
    cursor: usize,

    /// Commands to forward, in order
    pending: Vec<Command>,
}

impl InputPanel {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            pending: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Take queued commands
    pub fn take_pending_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    /// Adopt the service's draft when it changed underneath us (send, clear)
    pub fn sync_from_service(&mut self, draft: &str) {
        if self.buffer != draft {
            self.buffer = draft.to_string();
            self.cursor = self.buffer.len();
        }
    }

    fn edited(&mut self) {
        self.pending.push(Command::set_draft(self.buffer.clone()));
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    /// Display column of the cursor, relative to the start of the text
    fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].width()
    }
}

impl Default for InputPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for InputPanel {
    fn id(&self) -> PanelId {
        PanelId::INPUT
    }

    fn name(&self) -> &str {
        "Input"
    }

    fn handle_input(&mut self, event: &TuiEvent, state: &mut AppState) -> Result<bool> {
        let TuiEvent::Key(key) = event else {
            return Ok(false);
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('l') => {
                    self.pending.push(Command::Clear);
                    Ok(true)
                }
                _ => Ok(false),
            };
        }

        // Auto-enter insert mode when focused
        if !state.input_mode.is_editing() {
            state.input_mode.to_insert();
        }

        match key.code {
            KeyCode::Enter => {
                // The draft is already synced; the service decides whether it is sendable
                self.pending.push(Command::SendDraft);
                Ok(true)
            }
            KeyCode::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                self.edited();
                Ok(true)
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let start = self.prev_boundary();
                    self.buffer.replace_range(start..self.cursor, "");
                    self.cursor = start;
                    self.edited();
                }
                Ok(true)
            }
            KeyCode::Delete => {
                if self.cursor < self.buffer.len() {
                    let end = self.next_boundary();
                    self.buffer.replace_range(self.cursor..end, "");
                    self.edited();
                }
                Ok(true)
            }
            KeyCode::Left => {
                self.cursor = self.prev_boundary();
                Ok(true)
            }
            KeyCode::Right => {
                self.cursor = self.next_boundary();
                Ok(true)
            }
            KeyCode::Home => {
                self.cursor = 0;
                Ok(true)
            }
            KeyCode::End => {
                self.cursor = self.buffer.len();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title(" Message (Enter send, Ctrl+L clear) ")
            .borders(Borders::ALL)
            .border_style(border_style(focused));

        let inner = block.inner(area);

        // Keep the cursor visible on long drafts
        let prompt_width = PROMPT.width();
        let visible = (inner.width as usize).saturating_sub(prompt_width + 1);
        let column = self.cursor_column();
        let skip = column.saturating_sub(visible);

        let input_text = if self.buffer.is_empty() {
            Line::from(vec![
                Span::raw(PROMPT),
                Span::styled("Type a message...", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![Span::raw(PROMPT), Span::raw(self.buffer.as_str())])
        };

        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(input_text).scroll((0, skip as u16)),
            inner,
        );

        if focused {
            let cursor_x = inner.x + (prompt_width + column - skip) as u16;
            if cursor_x < inner.x + inner.width {
                frame.set_cursor_position((cursor_x, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InputMode;
    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> TuiEvent {
        TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(panel: &mut InputPanel, state: &mut AppState, text: &str) {
        for c in text.chars() {
            panel.handle_input(&key(KeyCode::Char(c)), state).unwrap();
        }
    }

    #[test]
    fn test_typing_syncs_draft() {
        let mut panel = InputPanel::new();
        let mut state = AppState::new();

        type_str(&mut panel, &mut state, "hi");

        assert_eq!(panel.buffer(), "hi");
        assert_eq!(
            panel.take_pending_commands(),
            vec![Command::set_draft("h"), Command::set_draft("hi")]
        );
    }

    #[test]
    fn test_enter_and_ctrl_l() {
        let mut panel = InputPanel::new();
        let mut state = AppState::new();

        panel.handle_input(&key(KeyCode::Enter), &mut state).unwrap();
        let ctrl_l = TuiEvent::Key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        panel.handle_input(&ctrl_l, &mut state).unwrap();

        assert_eq!(
            panel.take_pending_commands(),
            vec![Command::SendDraft, Command::Clear]
        );
        // Ctrl+L is not text
        assert_eq!(panel.buffer(), "");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut panel = InputPanel::new();
        let mut state = AppState::new();

        type_str(&mut panel, &mut state, "héllo");
        panel.handle_input(&key(KeyCode::Home), &mut state).unwrap();
        panel.handle_input(&key(KeyCode::Right), &mut state).unwrap();
        panel.handle_input(&key(KeyCode::Delete), &mut state).unwrap();
        assert_eq!(panel.buffer(), "hllo");

        panel.handle_input(&key(KeyCode::End), &mut state).unwrap();
        panel.handle_input(&key(KeyCode::Backspace), &mut state).unwrap();
        assert_eq!(panel.buffer(), "hll");
    }

    #[test]
    fn test_wide_chars_cursor_column() {
        let mut panel = InputPanel::new();
        let mut state = AppState::new();

        type_str(&mut panel, &mut state, "日本");
        assert_eq!(panel.cursor_column(), 4);

        panel.handle_input(&key(KeyCode::Left), &mut state).unwrap();
        assert_eq!(panel.cursor_column(), 2);
    }

    #[test]
    fn test_sync_from_service() {
        let mut panel = InputPanel::new();
        let mut state = AppState::new();

        type_str(&mut panel, &mut state, "draft");
        panel.sync_from_service("draft");
        assert_eq!(panel.buffer(), "draft");

        // A send or clear empties the service draft
        panel.sync_from_service("");
        assert_eq!(panel.buffer(), "");
        assert_eq!(panel.cursor, 0);
    }

    #[test]
    fn test_typing_enters_insert_mode() {
        let mut panel = InputPanel::new();
        let mut state = AppState::new();
        state.input_mode = InputMode::Normal;

        type_str(&mut panel, &mut state, "x");
        assert_eq!(state.input_mode, InputMode::Insert);
    }
}
