//! Pointer interaction logic for panel cells.
//!
//! Each cell kind is driven by a small state machine that knows nothing
//! about AppKit: the view forwards tracking-area callbacks and timer fires,
//! and the machine answers with effects (arm/cancel a timer, press/release
//! keys) or key deltas for an [`InputSink`] to perform.

pub mod cell;
pub mod click_dwell;
pub mod dwell;
pub mod joystick;
pub mod sink;

pub use cell::CellBehavior;
pub use click_dwell::{ClickDwell, ClickDwellEvent};
pub use dwell::{apply_key_effects, DwellEffect, DwellTracker};
pub use joystick::{Direction, JoystickMapper, KeyDelta};
pub use sink::{InputSink, KeyRouter, KeyTarget};
