//! Application domain model.
//!
//! This module contains pure business logic (no FFI dependencies):
//! presets as stored on disk, the global config, the running application
//! state and configuration constants.
//!
//! Reading and writing the JSON files is in `storage`.

pub mod app_state;
pub mod config;
pub mod constants;
pub mod preset;

pub use app_state::{AppState, GridAxis};
pub use config::{AppConfig, WindowPosition};
pub use constants::*;
pub use preset::{Action, ActionKind, JoystickKeys, Panel, Preset};
