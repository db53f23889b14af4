//! Event bus over an mpsc channel.
//!
//! Any thread may publish through an `EventPublisher`; the main thread
//! drains the queue from its pump timer.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::AppEvent;

/// Multi-producer, single-consumer queue of [`AppEvent`]s.
///
/// # Example
///
/// ```
/// use dwellpad::events::{AppEvent, EventBus};
///
/// let bus = EventBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(AppEvent::TogglePreset(0));
///
/// let events = bus.drain();
/// assert_eq!(events, vec![AppEvent::TogglePreset(0)]);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A cloneable handle for publishing into this bus.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Next queued event, without blocking.
    pub fn try_recv(&self) -> Option<AppEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Every queued event, in publish order.
    pub fn drain(&self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, thread-safe publishing handle.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
}

impl EventPublisher {
    pub fn from_sender(sender: Sender<AppEvent>) -> Self {
        Self { sender }
    }

    /// Queue an event. Silently dropped once the receiver is gone (shutdown).
    pub fn publish(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }
}
