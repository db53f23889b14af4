//! macOS input: event synthesis and lifecycle observers.

pub mod observers;
pub mod synth;

pub use observers::install_termination_observer;
pub use synth::{cursor_location, CgInputSink};
