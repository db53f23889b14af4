//! Destination for synthesized keyboard and mouse events.

use crate::geometry::Point;
use crate::keys::{KeyChord, MouseButton};

/// Something that can post key and mouse events.
///
/// The macOS implementation posts Quartz events; tests record calls.
pub trait InputSink {
    fn key_down(&mut self, chord: &KeyChord);

    fn key_up(&mut self, chord: &KeyChord);

    /// Press and release `button` at `at` (global screen coordinates).
    fn click(&mut self, button: MouseButton, at: Point);

    /// Press then release a chord.
    fn tap(&mut self, chord: &KeyChord) {
        self.key_down(chord);
        self.key_up(chord);
    }
}

/// Where a synthesized key event is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// A specific process.
    Process(i32),
    /// The HID event tap, routed like hardware input.
    HidTap,
}

/// Remembers where each held chord was pressed so its release goes to the
/// same place, even after focus has moved to another application.
#[derive(Debug, Default, Clone)]
pub struct KeyRouter {
    held: Vec<(KeyChord, KeyTarget)>,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target for a key-down: the frontmost process if known, else the HID tap.
    pub fn route_down(&mut self, chord: KeyChord, frontmost: Option<i32>) -> KeyTarget {
        let target = frontmost.map_or(KeyTarget::HidTap, KeyTarget::Process);
        match self.held.iter_mut().find(|(c, _)| *c == chord) {
            Some(entry) => entry.1 = target,
            None => self.held.push((chord, target)),
        }
        target
    }

    /// Target for a key-up: wherever the matching key-down went. A release
    /// with no recorded press goes to the HID tap.
    pub fn route_up(&mut self, chord: KeyChord) -> KeyTarget {
        match self.held.iter().position(|(c, _)| *c == chord) {
            Some(i) => self.held.swap_remove(i).1,
            None => KeyTarget::HidTap,
        }
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }
}
