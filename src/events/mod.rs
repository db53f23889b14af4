//! Event system for decoupled communication between windows and state.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Presets   │     │   Panel     │     │   Preset    │
//! │   window    │     │  delegates  │     │   editor    │
//! └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!        │ publish()         │ publish()         │ publish()
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     EventBus                        │
//! │                   (mpsc channel)                    │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ drain()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │        reducer (AppState) → UiCommands → AppKit     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! - [`types`]: `AppEvent`
//! - [`bus`]: `EventBus` and `EventPublisher`
//! - [`global`]: process-wide bus used by Objective-C callbacks

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{drain_events, init_event_bus, publish, publisher};
pub use types::AppEvent;
