//! Internal event system for omnichat-core
//!
//! Worker threads report back to the service through this bus. UI events
//! (keys, resize) are handled in omnichat-tui, not here.

use crate::llm::Reply;
use crate::types::RequestId;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::time::Duration;

/// Internal backend events
#[derive(Debug, Clone)]
pub enum Event {
    /// A dispatch resolved on a worker thread
    ReplyReady { request_id: RequestId, reply: Reply },
}

/// Event bus using bounded crossbeam channels
///
/// Bounded channels provide backpressure - if the receiver is slow,
/// senders will block, preventing unbounded memory growth.
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl EventBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// Get a sender clone for spawning event producers
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Receive the next event with timeout
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Event> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Drain up to `max` events
    pub fn drain(&self, max: usize) -> Vec<Event> {
        let mut events = Vec::with_capacity(max);
        while events.len() < max {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(_) => break,
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderName;

    fn ready(id: u64) -> Event {
        Event::ReplyReady {
            request_id: RequestId(id),
            reply: Reply::not_implemented(ProviderName::Grok),
        }
    }

    #[test]
    fn test_event_bus() {
        let bus = EventBus::new(10);
        bus.sender().send(ready(1)).unwrap();
        assert!(bus.recv_timeout(Duration::from_millis(10)).is_some());
        assert!(bus.recv_timeout(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_drain_respects_max() {
        let bus = EventBus::new(10);
        for id in 0..5 {
            bus.sender().send(ready(id)).unwrap();
        }
        assert_eq!(bus.drain(3).len(), 3);
        assert_eq!(bus.drain(10).len(), 2);
    }
}
