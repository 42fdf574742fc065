//! Conversation log panel
//!
//! Renders the message log top to bottom, wrapped to the panel width.
//! Follows the newest message until the user scrolls up.

use super::{border_style, contains, Panel};
use crate::events::TuiEvent;
use crate::state::{AppState, PanelId};
use omnichat_core::{ChatService, Message, ProviderName, Result, Sender};
use crossterm::event::{KeyCode, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Conversation log with scrolling
pub struct ConversationPanel {
    /// Snapshot of the service log
    messages: Vec<Message>,

    /// Provider of the in-flight request
    waiting_on: Option<ProviderName>,

    /// Active provider and its model, for the title
    title: String,

    /// First visible wrapped line
    scroll: usize,

    /// Stick to the bottom as messages arrive
    follow: bool,

    /// Inner area from the last render
    inner_area: Rect,
}

impl ConversationPanel {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            waiting_on: None,
            title: " Conversation ".to_string(),
            scroll: 0,
            follow: true,
            inner_area: Rect::default(),
        }
    }

    /// Refresh content from service
    pub fn update_from_service(&mut self, service: &ChatService) {
        if self.messages.as_slice() != service.messages() {
            self.messages = service.messages().to_vec();
        }
        self.waiting_on = service.state().phase().pending().map(|p| p.provider);

        let provider = service.selected();
        self.title = match service.model(provider) {
            Some(model) => format!(" {} · {} ", provider, model),
            None => format!(" {} ", provider),
        };
    }

    /// Jump back to the newest message
    pub fn follow_bottom(&mut self) {
        self.follow = true;
    }

    /// Build the wrapped display lines
    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if self.messages.is_empty() && self.waiting_on.is_none() {
            lines.push(Line::from(Span::styled(
                "No messages yet. Pick a provider and say hello.",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        for message in &self.messages {
            let color = match message.sender() {
                Sender::User => Color::Cyan,
                Sender::Provider(_) => Color::Green,
            };
            lines.push(Line::from(Span::styled(
                format!("{}:", message.sender().label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            for row in wrap_text(message.text(), width) {
                lines.push(Line::from(row));
            }
            lines.push(Line::default());
        }

        if let Some(provider) = self.waiting_on {
            lines.push(Line::from(Span::styled(
                format!("Waiting for {}…", provider),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        lines
    }

    fn max_scroll(&self, total: usize) -> usize {
        total.saturating_sub(self.inner_area.height as usize)
    }

    fn total_lines(&self) -> usize {
        self.lines(self.inner_area.width as usize).len()
    }

    fn scroll_up(&mut self, by: usize) {
        if self.follow {
            self.scroll = self.max_scroll(self.total_lines());
            self.follow = false;
        }
        self.scroll = self.scroll.saturating_sub(by);
    }

    fn scroll_down(&mut self, by: usize) {
        let max = self.max_scroll(self.total_lines());
        self.scroll = (self.scroll + by).min(max);
        if self.scroll == max {
            self.follow = true;
        }
    }
}

impl Default for ConversationPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ConversationPanel {
    fn id(&self) -> PanelId {
        PanelId::CONVERSATION
    }

    fn name(&self) -> &str {
        "Conversation"
    }

    fn handle_input(&mut self, event: &TuiEvent, _state: &mut AppState) -> Result<bool> {
        let page = (self.inner_area.height as usize).max(1);
        match event {
            TuiEvent::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_up(1);
                    Ok(true)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_down(1);
                    Ok(true)
                }
                KeyCode::PageUp => {
                    self.scroll_up(page);
                    Ok(true)
                }
                KeyCode::PageDown => {
                    self.scroll_down(page);
                    Ok(true)
                }
                KeyCode::Home | KeyCode::Char('g') => {
                    self.follow = false;
                    self.scroll = 0;
                    Ok(true)
                }
                KeyCode::End | KeyCode::Char('G') => {
                    self.follow_bottom();
                    Ok(true)
                }
                _ => Ok(false),
            },
            TuiEvent::Mouse(mouse) => {
                if !contains(self.inner_area, mouse.column, mouse.row) {
                    return Ok(false);
                }
                match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        self.scroll_up(3);
                        Ok(true)
                    }
                    MouseEventKind::ScrollDown => {
                        self.scroll_down(3);
                        Ok(true)
                    }
                    _ => Ok(false),
                }
            }
            TuiEvent::Resize(..) => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL)
            .border_style(border_style(focused));

        let inner = block.inner(area);
        self.inner_area = inner;

        let lines = self.lines(inner.width as usize);
        let max = self.max_scroll(lines.len());
        if self.follow || self.scroll > max {
            self.scroll = max;
        }

        let visible: Vec<Line> = lines
            .into_iter()
            .skip(self.scroll)
            .take(inner.height as usize)
            .collect();

        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(visible), inner);
    }
}

/// Wrap text to `width` display columns, breaking at spaces when possible.
///
/// Explicit newlines are kept. A zero width yields the text unwrapped.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_string).collect();
    }

    let mut rows = Vec::new();
    for source in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;

        for word in source.split_inclusive(' ') {
            let bare = word.trim_end_matches(' ');
            let bare_width = display_width(bare);

            if row_width + bare_width > width && row_width > 0 {
                rows.push(row.trim_end().to_string());
                row.clear();
                row_width = 0;
            }

            if bare_width <= width {
                row.push_str(word);
                row_width += display_width(word);
                continue;
            }

            // Word longer than a row: hard break by character
            for c in bare.chars() {
                let w = c.width().unwrap_or(0);
                if row_width + w > width && row_width > 0 {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push(c);
                row_width += w;
            }
            let spaces = &word[bare.len()..];
            row.push_str(spaces);
            row_width += spaces.len();
        }

        rows.push(row.trim_end().to_string());
    }

    rows
}

fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}
