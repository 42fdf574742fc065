//! ChatService - Main backend facade
//!
//! This module provides the primary interface for any UI to interact with
//! the OmniChat backend. It owns the conversation state, runs provider
//! calls on worker threads and reports changes as notifications.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   Command     ┌──────────────────┐
//! │   Any UI          │ ─────────────→│   ChatService    │
//! │   (TUI)           │               │                  │
//! │                   │ ←─────────────│   (Backend)      │
//! └───────────────────┘  Notification └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use omnichat_core::{ChatService, Command};
//!
//! let mut service = ChatService::new(&config);
//! service.send(Command::set_draft("Hello"))?;
//! service.send(Command::SendDraft)?;
//!
//! // Each frame
//! service.process_events();
//! while let Some(notif) = service.poll_notification() {
//!     // update the view
//! }
//! ```

use crate::commands::Command;
use crate::config::ChatConfig;
use crate::conversation::{ChatState, PendingRequest, SendError};
use crate::error::{ChatError, Result};
use crate::events::{Event, EventBus};
use crate::llm::{Dispatcher, HttpTransport, Reply, UreqTransport};
use crate::notifications::Notification;
use crate::types::{Message, ProviderName, RequestId};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

/// Maximum events applied per `process_events` call
const MAX_EVENTS_PER_TICK: usize = 64;

/// Main backend service facade
pub struct ChatService {
    /// Worker -> service event bus
    events: EventBus,

    /// Notification sender (to UI)
    notification_tx: Sender<Notification>,

    /// Notification receiver (for UI to poll)
    notification_rx: Receiver<Notification>,

    /// Shared with worker threads
    dispatcher: Arc<Dispatcher>,

    /// Conversation log, draft, selection and phase
    state: ChatState,

    shut_down: bool,
}

impl ChatService {
    /// Create a service that talks to the real vendor endpoints
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    /// Create a service over a custom transport
    pub fn with_transport(config: &ChatConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let (notification_tx, notification_rx) = bounded(1000);
        let dispatcher = Arc::new(Dispatcher::from_config(config, transport));

        for provider in ProviderName::ALL {
            if provider.has_adapter() && !dispatcher.is_ready(provider) {
                tracing::warn!(%provider, "no API key configured");
            }
        }

        Self {
            events: EventBus::new(256),
            notification_tx,
            notification_rx,
            dispatcher,
            state: ChatState::new(config.default_provider()),
            shut_down: false,
        }
    }

    /// Send a command to the backend
    pub fn send(&mut self, command: Command) -> Result<()> {
        if self.shut_down {
            return Err(ChatError::invalid_operation("service is shut down"));
        }

        match command {
            Command::SelectProvider { provider } => {
                if self.state.selected() != provider {
                    tracing::info!(%provider, "provider selected");
                    self.state.select(provider);
                    self.notify(Notification::ProviderSelected { provider });
                }
            }
            Command::SetDraft { text } => {
                self.state.set_draft(text);
            }
            Command::SendDraft => self.send_draft(),
            Command::Clear => {
                tracing::info!(
                    messages = self.state.len(),
                    pending = self.state.is_awaiting_reply(),
                    "conversation cleared"
                );
                self.state.clear();
                self.notify(Notification::Cleared);
            }
            Command::Shutdown => {
                tracing::info!("shutting down");
                self.shut_down = true;
            }
        }

        Ok(())
    }

    fn send_draft(&mut self) {
        let pending = match self.state.begin_send() {
            Ok(pending) => pending,
            Err(SendError::EmptyDraft) => return,
            Err(SendError::Busy(provider)) => {
                tracing::info!(%provider, "send refused while a reply is pending");
                self.notify(Notification::Busy { provider });
                return;
            }
        };

        tracing::info!(
            request_id = %pending.id,
            provider = %pending.provider,
            chars = pending.message.chars().count(),
            "sending message"
        );

        if let Some(message) = self.state.messages().last().cloned() {
            self.notify(Notification::MessageAppended { message });
        }
        self.notify(Notification::RequestStarted {
            request_id: pending.id,
            provider: pending.provider,
        });

        // No adapter means no I/O; resolve on the spot.
        if self.dispatcher.adapter(pending.provider).is_none() {
            let reply = self.dispatcher.dispatch(pending.provider, &pending.message);
            self.finish(pending.id, reply);
            return;
        }

        let (id, provider) = (pending.id, pending.provider);
        if let Err(err) = self.spawn_dispatch(pending) {
            tracing::error!(request_id = %id, "failed to start worker: {}", err);
            self.notify(Notification::error(format!("Failed to start request: {}", err)));
            self.finish(id, Reply::crashed(provider));
        }
    }

    /// Run one dispatch on a detached worker thread
    fn spawn_dispatch(&self, pending: PendingRequest) -> std::io::Result<()> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let tx = self.events.sender();
        let PendingRequest {
            id,
            provider,
            message,
        } = pending;

        std::thread::Builder::new()
            .name(format!("omnichat-{}", id))
            .spawn(move || {
                let reply = panic::catch_unwind(AssertUnwindSafe(|| {
                    dispatcher.dispatch(provider, &message)
                }))
                .unwrap_or_else(|_| Reply::crashed(provider));

                let _ = tx.send(Event::ReplyReady {
                    request_id: id,
                    reply,
                });
            })?;

        Ok(())
    }

    /// Apply worker results without blocking. Returns the number applied.
    pub fn process_events(&mut self) -> usize {
        let events = self.events.drain(MAX_EVENTS_PER_TICK);
        let count = events.len();
        for event in events {
            self.apply(event);
        }
        count
    }

    /// Block until one worker result arrives or `timeout` elapses.
    ///
    /// Returns true if an event was applied.
    pub fn wait_for_event(&mut self, timeout: Duration) -> bool {
        match self.events.recv_timeout(timeout) {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::ReplyReady { request_id, reply } => self.finish(request_id, reply),
        }
    }

    fn finish(&mut self, request_id: RequestId, reply: Reply) {
        let Reply {
            provider,
            text,
            outcome,
        } = reply;

        let Some(message) = self.state.complete(request_id, text).cloned() else {
            tracing::warn!(%request_id, "dropping reply for a request that is not pending");
            return;
        };

        tracing::info!(%request_id, %provider, ?outcome, "reply received");
        self.notify(Notification::MessageAppended { message });
        self.notify(Notification::RequestFinished {
            request_id,
            provider,
            outcome,
        });
    }

    fn notify(&self, notification: Notification) {
        if self.notification_tx.try_send(notification).is_err() {
            tracing::trace!("notification queue full, dropping");
        }
    }

    /// Poll for the next notification (non-blocking)
    pub fn poll_notification(&self) -> Option<Notification> {
        self.notification_rx.try_recv().ok()
    }

    /// Full conversation state
    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        self.state.messages()
    }

    pub fn draft(&self) -> &str {
        self.state.draft()
    }

    pub fn selected(&self) -> ProviderName {
        self.state.selected()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state.is_awaiting_reply()
    }

    /// Whether the provider has an adapter and a credential
    pub fn is_ready(&self, provider: ProviderName) -> bool {
        self.dispatcher.is_ready(provider)
    }

    /// Model used by the provider's adapter, if it has one
    pub fn model(&self, provider: ProviderName) -> Option<&str> {
        self.dispatcher.adapter(provider).map(|a| a.model())
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}
