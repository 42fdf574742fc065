//! Provider selector panel
//!
//! Lists every provider in its fixed order. `●` marks the active one,
//! `○` marks providers that cannot answer (no adapter or no key).

use super::{border_style, contains, Panel};
use crate::events::TuiEvent;
use crate::state::{AppState, PanelId};
use omnichat_core::{ChatService, Command, ProviderName, Result};
use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Provider list with a movable cursor
pub struct ProvidersPanel {
    /// Cursor position in `ProviderName::ALL`
    cursor: usize,

    /// Provider currently used for sends
    active: ProviderName,

    /// Per-provider readiness, indexed like `ProviderName::ALL`
    ready: [bool; ProviderName::ALL.len()],

    /// Cached list area for hit testing
    list_area: Rect,

    /// Selection to forward to the service
    pending_command: Option<Command>,
}

impl ProvidersPanel {
    pub fn new(active: ProviderName) -> Self {
        Self {
            cursor: active.index(),
            active,
            ready: [false; ProviderName::ALL.len()],
            list_area: Rect::default(),
            pending_command: None,
        }
    }

    /// Refresh active provider and readiness from the service
    pub fn update_from_service(&mut self, service: &ChatService) {
        self.active = service.selected();
        for provider in ProviderName::ALL {
            self.ready[provider.index()] = service.is_ready(provider);
        }
    }

    /// Take the queued selection, if any
    pub fn take_pending_command(&mut self) -> Option<Command> {
        self.pending_command.take()
    }

    /// Provider under the cursor
    pub fn highlighted(&self) -> ProviderName {
        ProviderName::ALL[self.cursor]
    }

    pub fn active(&self) -> ProviderName {
        self.active
    }

    fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn down(&mut self) {
        if self.cursor + 1 < ProviderName::ALL.len() {
            self.cursor += 1;
        }
    }

    fn choose(&mut self) {
        let provider = self.highlighted();
        if provider != self.active {
            self.pending_command = Some(Command::select(provider));
        }
    }

    fn marker(&self, provider: ProviderName) -> &'static str {
        if provider == self.active {
            "● "
        } else if !self.ready[provider.index()] {
            "○ "
        } else {
            "  "
        }
    }
}

impl Panel for ProvidersPanel {
    fn id(&self) -> PanelId {
        PanelId::PROVIDERS
    }

    fn name(&self) -> &str {
        "Providers"
    }

    fn handle_input(&mut self, event: &TuiEvent, _state: &mut AppState) -> Result<bool> {
        match event {
            TuiEvent::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.up();
                    Ok(true)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.down();
                    Ok(true)
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.choose();
                    Ok(true)
                }
                _ => Ok(false),
            },
            TuiEvent::Mouse(mouse) => {
                if !contains(self.list_area, mouse.column, mouse.row) {
                    return Ok(false);
                }
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        let row = (mouse.row - self.list_area.y) as usize;
                        if row < ProviderName::ALL.len() {
                            self.cursor = row;
                            self.choose();
                        }
                        Ok(true)
                    }
                    MouseEventKind::ScrollUp => {
                        self.up();
                        Ok(true)
                    }
                    MouseEventKind::ScrollDown => {
                        self.down();
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
            .title(" Providers ")
            .borders(Borders::ALL)
            .border_style(border_style(focused));

        self.list_area = block.inner(area);

        let items: Vec<ListItem> = ProviderName::ALL
            .iter()
            .map(|&provider| {
                let style = if provider == self.active {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else if !self.ready[provider.index()] {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };

                ListItem::new(Line::from(Span::styled(
                    format!("{}{}", self.marker(provider), provider),
                    style,
                )))
            })
            .collect();

        let mut list_state = ListState::default();
        if focused {
            list_state.select(Some(self.cursor));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black));

        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
