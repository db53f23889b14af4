#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! Floating dwell/hover key panels.
//!
//! Everything outside `platform` is plain Rust with no FFI so the logic
//! (grid geometry, dwell timers, joystick mapping, persistence) can be
//! tested as normal integration tests on any host.

pub mod events;
pub mod geometry;
pub mod handlers;
pub mod input;
pub mod keys;
pub mod model;
pub mod platform;
pub mod storage;

// Re-export model types for convenience
pub use model::{Action, ActionKind, AppConfig, AppState, Panel, Preset};

// Re-export event types for convenience
pub use events::{AppEvent, EventBus, EventPublisher};

/// Clamp a value to [lo, hi]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
