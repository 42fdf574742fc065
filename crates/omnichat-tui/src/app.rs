//! TuiApp - Main application struct using ChatService
//!
//! This is the bridge between the TUI layer and the backend.
//! It handles terminal events, sends Commands, and reacts to Notifications.

use omnichat_core::{ChatConfig, ChatService, Command, Notification, ReplyOutcome, Result};
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::time::Duration;

use crate::events::TuiEvent;
use crate::panels::{ConversationPanel, InputPanel, Panel, ProvidersPanel};
use crate::state::{AppState, InputMode, MessageLevel, PanelId};
use crate::ui::{get_layout, AppLayout};

/// How long to wait for terminal input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Main TUI application
///
/// Owns the ChatService and manages the TUI event loop.
pub struct TuiApp {
    /// Backend service
    service: ChatService,

    /// TUI-specific state
    state: AppState,

    /// Areas from the last render, for mouse hit testing
    layout: AppLayout,

    /// Panel instances
    providers: ProvidersPanel,
    conversation: ConversationPanel,
    input: InputPanel,
}

impl TuiApp {
    /// Create a new TuiApp talking to the real vendor endpoints
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_service(ChatService::new(config))
    }

    /// Create a TuiApp around an existing service
    pub fn with_service(service: ChatService) -> Self {
        let mut app = Self {
            providers: ProvidersPanel::new(service.selected()),
            service,
            state: AppState::new(),
            layout: get_layout(Rect::default()),
            conversation: ConversationPanel::new(),
            input: InputPanel::new(),
        };
        app.sync_panels();
        app
    }

    pub fn service(&self) -> &ChatService {
        &self.service
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the main event loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.tick();

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(POLL_INTERVAL)? {
                if let Some(tui_event) = TuiEvent::from_terminal(event::read()?) {
                    self.handle_event(tui_event)?;
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply finished requests and backend notifications to the view
    pub fn tick(&mut self) {
        self.service.process_events();

        while let Some(notification) = self.service.poll_notification() {
            self.handle_notification(notification);
        }

        self.sync_panels();
    }

    /// Handle one terminal event, then forward whatever the panels queued
    pub fn handle_event(&mut self, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key) => self.handle_key(key)?,
            TuiEvent::Mouse(mouse) => self.handle_mouse(mouse)?,
            TuiEvent::Resize(cols, rows) => self.handle_resize(cols, rows),
        }

        if !self.state.should_quit {
            self.process_panel_actions()?;
            self.tick();
        }
        Ok(())
    }

    fn sync_panels(&mut self) {
        self.providers.update_from_service(&self.service);
        self.conversation.update_from_service(&self.service);
        self.input.sync_from_service(self.service.draft());
    }

    /// Forward commands queued by panels
    fn process_panel_actions(&mut self) -> Result<()> {
        if let Some(command) = self.providers.take_pending_command() {
            self.service.send(command)?;
        }

        for command in self.input.take_pending_commands() {
            self.service.send(command)?;
        }

        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        self.service.send(Command::Shutdown)?;
        self.state.quit();
        Ok(())
    }

    fn set_focus(&mut self, id: PanelId) {
        self.state.focus.focus(id);
        if self.state.focus.is_focused(PanelId::INPUT) {
            self.state.input_mode.to_insert();
        } else {
            self.state.input_mode.to_normal();
        }
    }

    /// Handle a key event
    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Global quit: Ctrl+C anywhere, 'q' outside insert mode
        if (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
            || (key.code == KeyCode::Char('q') && !self.state.input_mode.is_editing())
        {
            return self.quit();
        }

        match key.code {
            KeyCode::Tab => {
                self.state.focus.next();
                self.set_focus(self.state.focus.current());
                return Ok(());
            }
            KeyCode::BackTab => {
                self.state.focus.prev();
                self.set_focus(self.state.focus.current());
                return Ok(());
            }
            KeyCode::Esc => {
                self.state.input_mode.to_normal();
                self.state.clear_status();
                return Ok(());
            }
            _ => {}
        }

        let tui_event = TuiEvent::Key(key);
        match self.state.focus.current() {
            PanelId::PROVIDERS => self.providers.handle_input(&tui_event, &mut self.state)?,
            PanelId::CONVERSATION => self.conversation.handle_input(&tui_event, &mut self.state)?,
            PanelId::INPUT => self.input.handle_input(&tui_event, &mut self.state)?,
            _ => false,
        };

        Ok(())
    }

    /// Handle a mouse event
    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let Some(id) = self.layout.panel_at(mouse.column, mouse.row) else {
            return Ok(());
        };

        let tui_event = TuiEvent::Mouse(mouse);
        let handled = match id {
            PanelId::PROVIDERS => self.providers.handle_input(&tui_event, &mut self.state)?,
            PanelId::CONVERSATION => self.conversation.handle_input(&tui_event, &mut self.state)?,
            PanelId::INPUT => self.input.handle_input(&tui_event, &mut self.state)?,
            _ => false,
        };

        if handled || matches!(mouse.kind, event::MouseEventKind::Down(_)) {
            self.set_focus(id);
        }
        Ok(())
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.providers.on_resize(cols, rows);
        self.conversation.on_resize(cols, rows);
        self.input.on_resize(cols, rows);
    }

    /// Handle a notification from the backend
    fn handle_notification(&mut self, notification: Notification) {
        match notification {
            Notification::ProviderSelected { provider } => {
                if !provider.has_adapter() {
                    self.state
                        .warn(format!("{} is not implemented yet", provider));
                } else if !self.service.is_ready(provider) {
                    self.state
                        .warn(format!("{}: no API key configured", provider));
                } else {
                    self.state.info(format!("Now chatting with {}", provider));
                }
            }
            Notification::MessageAppended { .. } => {
                self.conversation.follow_bottom();
            }
            Notification::RequestStarted { provider, .. } => {
                self.state.info(format!("Asking {}…", provider));
            }
            Notification::RequestFinished {
                provider, outcome, ..
            } => match outcome {
                ReplyOutcome::Answered => self.state.clear_status(),
                ReplyOutcome::NotImplemented => {
                    self.state
                        .warn(format!("{} is not implemented yet", provider));
                }
                ReplyOutcome::Failed(kind) => {
                    self.state
                        .warn(format!("{} request failed ({})", provider, kind));
                }
                ReplyOutcome::Crashed => {
                    self.state.error(format!("{} request aborted", provider));
                }
            },
            Notification::Busy { provider } => {
                self.state
                    .warn(format!("Still waiting for {}. Try again when it replies.", provider));
            }
            Notification::Cleared => {
                self.state.info("Conversation cleared");
            }
            Notification::Error { message } => {
                self.state.error(message);
            }
        }
    }

    /// Render the TUI
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = get_layout(frame.area());
        self.layout = layout;

        self.providers.render(
            frame,
            layout.providers,
            self.state.focus.is_focused(PanelId::PROVIDERS),
        );
        self.conversation.render(
            frame,
            layout.conversation,
            self.state.focus.is_focused(PanelId::CONVERSATION),
        );
        self.input
            .render(frame, layout.input, self.state.focus.is_focused(PanelId::INPUT));
        self.render_status(frame, layout.status);
    }

    /// Render status bar
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.state.status_message {
            let style = match msg.level {
                MessageLevel::Info => Style::default().fg(Color::Green),
                MessageLevel::Warning => Style::default().fg(Color::Yellow),
                MessageLevel::Error => Style::default().fg(Color::Red),
            };
            Span::styled(format!(" {}", msg.text), style)
        } else {
            let quit_hint = match self.state.input_mode {
                InputMode::Insert => "Esc then q to quit",
                InputMode::Normal => "q to quit",
            };
            Span::styled(
                format!(
                    " {} | {} | Tab to switch panels | {} ",
                    self.state.input_mode.label(),
                    self.service.selected(),
                    quit_hint
                ),
                Style::default().fg(Color::Gray),
            )
        };

        let status = Paragraph::new(Line::from(status_text))
            .style(Style::default().bg(Color::DarkGray));

        frame.render_widget(status, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnichat_core::{Message, ProviderName, ScriptedTransport, NOT_IMPLEMENTED_TEXT};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use std::sync::Arc;

    fn app_with(transport: ScriptedTransport) -> TuiApp {
        let mut config = ChatConfig::default();
        config.providers.openai.api_key = Some("sk-test".into());
        TuiApp::with_service(ChatService::with_transport(&config, Arc::new(transport)))
    }

    fn press(app: &mut TuiApp, code: KeyCode) {
        app.handle_event(TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .unwrap();
    }

    fn ctrl(app: &mut TuiApp, c: char) {
        app.handle_event(TuiEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
        .unwrap();
    }

    fn type_str(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn settle(app: &mut TuiApp) {
        while app.service.is_awaiting_reply() {
            assert!(app.service.wait_for_event(Duration::from_secs(5)));
        }
        app.tick();
    }

    fn screen(app: &mut TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_send_hello_to_chatgpt() {
        let mut app = app_with(ScriptedTransport::new().with_json(json!({
            "choices": [{ "message": { "content": "Hi there" } }]
        })));

        type_str(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input.buffer(), "");

        settle(&mut app);
        assert_eq!(
            app.service().messages(),
            &[
                Message::user("Hello"),
                Message::reply(ProviderName::ChatGpt, "Hi there"),
            ]
        );

        let text = screen(&mut app);
        assert!(text.contains("You:"));
        assert!(text.contains("Hello"));
        assert!(text.contains("ChatGPT:"));
        assert!(text.contains("Hi there"));
    }

    #[test]
    fn test_select_grok_from_provider_list() {
        let transport = Arc::new(ScriptedTransport::new());
        let service = ChatService::with_transport(&ChatConfig::default(), transport.clone());
        let mut app = TuiApp::with_service(service);

        // Input -> Providers, cursor ChatGPT -> Grok
        press(&mut app, KeyCode::Tab);
        assert!(app.state().focus.is_focused(PanelId::PROVIDERS));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.service().selected(), ProviderName::Grok);
        assert_eq!(
            app.state().status_message.as_ref().map(|m| m.level),
            Some(MessageLevel::Warning)
        );

        press(&mut app, KeyCode::BackTab);
        assert!(app.state().focus.is_focused(PanelId::INPUT));
        assert_eq!(app.state().input_mode, InputMode::Insert);

        type_str(&mut app, "test");
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(
            app.service().messages(),
            &[
                Message::user("test"),
                Message::reply(ProviderName::Grok, NOT_IMPLEMENTED_TEXT),
            ]
        );
        assert_eq!(transport.calls(), 0);
        assert!(screen(&mut app).contains("Grok (XAI):"));
    }

    #[test]
    fn test_ctrl_l_clears() {
        let mut app = app_with(ScriptedTransport::new());
        app.service.send(Command::select(ProviderName::Perplexity)).unwrap();

        type_str(&mut app, "hi");
        press(&mut app, KeyCode::Enter);
        settle(&mut app);
        type_str(&mut app, "leftover");
        assert_eq!(app.service().messages().len(), 2);

        ctrl(&mut app, 'l');
        assert!(app.service().messages().is_empty());
        assert_eq!(app.service().draft(), "");
        assert_eq!(app.input.buffer(), "");
    }

    #[test]
    fn test_q_types_in_insert_mode_and_quits_in_normal() {
        let mut app = app_with(ScriptedTransport::new());

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.state().should_quit);
        assert_eq!(app.service().draft(), "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.state().should_quit);
        assert!(app.service().is_shut_down());
    }

    #[test]
    fn test_ctrl_c_quits_from_insert_mode() {
        let mut app = app_with(ScriptedTransport::new());
        ctrl(&mut app, 'c');
        assert!(app.state().should_quit);
    }

    #[test]
    fn test_status_bar_shows_mode_and_provider() {
        let mut app = app_with(ScriptedTransport::new());
        let text = screen(&mut app);
        let status = text.lines().last().unwrap_or_default().to_string();
        assert!(status.contains("INSERT"));
        assert!(status.contains("ChatGPT"));
    }
}
