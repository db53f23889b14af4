//! Event handling.
//!
//! [`reducer`] applies events to `AppState` and returns the UI commands the
//! platform layer must execute. The macOS dispatcher that drains the bus and
//! runs those commands is in `platform::macos::handlers`.

pub mod reducer;

pub use reducer::{handle_event, UiCommand};
