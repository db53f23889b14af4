//! Process-wide event bus.
//!
//! `init_event_bus()` is called once in `main`; Objective-C callbacks then
//! publish with `publish()` and the pump timer drains with `drain_events()`.
//!
//! The sender lives in a `OnceLock` (it is `Send + Sync`); the receiver is
//! wrapped in a `Mutex` and only ever locked from the main thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, OnceLock};

use tracing::warn;

use super::bus::EventPublisher;
use super::types::AppEvent;

static SENDER: OnceLock<Sender<AppEvent>> = OnceLock::new();

static RECEIVER: OnceLock<Mutex<Receiver<AppEvent>>> = OnceLock::new();

/// Install the global bus. Later calls are ignored.
///
/// Returns false if the bus was already initialized.
pub fn init_event_bus() -> bool {
    let (sender, receiver) = mpsc::channel();
    if SENDER.set(sender).is_err() {
        return false;
    }
    RECEIVER.set(Mutex::new(receiver)).is_ok()
}

/// Publisher for the global bus, or `None` before `init_event_bus()`.
pub fn publisher() -> Option<EventPublisher> {
    SENDER.get().cloned().map(EventPublisher::from_sender)
}

/// Publish to the global bus. Events published before initialization are
/// logged and dropped.
pub fn publish(event: AppEvent) {
    match SENDER.get() {
        Some(sender) => {
            let _ = sender.send(event);
        }
        None => warn!("event bus not initialized, dropping {:?}", event),
    }
}

/// Every event published since the last drain.
pub fn drain_events() -> Vec<AppEvent> {
    let Some(receiver) = RECEIVER.get() else {
        return Vec::new();
    };
    let receiver = match receiver.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    std::iter::from_fn(|| receiver.try_recv().ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The statics can only be set once per test binary, so all global
    // behaviour is checked in a single test.
    #[test]
    fn test_global_bus_lifecycle() {
        init_event_bus();
        assert!(!init_event_bus());

        publish(AppEvent::TogglePreset(1));
        if let Some(p) = publisher() {
            p.publish(AppEvent::Quit);
        }

        assert_eq!(
            drain_events(),
            vec![AppEvent::TogglePreset(1), AppEvent::Quit]
        );
        assert!(drain_events().is_empty());
    }
}
