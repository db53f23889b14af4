//! Joystick cell: maps the pointer offset from the cell centre to held
//! direction keys.
//!
//! ```text
//!              dy > threshold: up
//!                    ▲
//!   dx < -threshold  │  dx > threshold
//!        left ◀──── (·) ────▶ right        (·) = dead zone radius
//!                    │
//!                    ▼
//!              dy < -threshold: down
//! ```
//!
//! Diagonals hold two keys. Each sample yields only the difference against
//! what is already held, releases before presses.

use std::collections::BTreeSet;

use crate::input::InputSink;
use crate::keys::{KeyChord, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};
use crate::model::constants::{JOYSTICK_AXIS_THRESHOLD, JOYSTICK_DEAD_ZONE};
use crate::model::JoystickKeys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Keys to release and press after a sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDelta {
    pub release: Vec<KeyChord>,
    pub press: Vec<KeyChord>,
}

impl KeyDelta {
    pub fn is_empty(&self) -> bool {
        self.release.is_empty() && self.press.is_empty()
    }

    /// Post the delta, releases first.
    pub fn apply(&self, sink: &mut dyn InputSink) {
        for chord in &self.release {
            sink.key_up(chord);
        }
        for chord in &self.press {
            sink.key_down(chord);
        }
    }
}

#[derive(Debug, Clone)]
pub struct JoystickMapper {
    /// Chords indexed in [`Direction::ALL`] order.
    keys: [KeyChord; 4],
    dead_zone: f64,
    axis_threshold: f64,
    held: BTreeSet<KeyChord>,
    directions: Vec<Direction>,
}

impl JoystickMapper {
    /// `keys` in up, down, left, right order.
    pub fn new(keys: [KeyChord; 4]) -> Self {
        Self {
            keys,
            dead_zone: JOYSTICK_DEAD_ZONE,
            axis_threshold: JOYSTICK_AXIS_THRESHOLD,
            held: BTreeSet::new(),
            directions: Vec::new(),
        }
    }

    /// Resolve configured key names; `None` if any name is unknown.
    pub fn from_keys(keys: &JoystickKeys) -> Option<Self> {
        let parse = |name: &str| KeyChord::parse(name);
        Some(Self::new([
            parse(&keys.up)?,
            parse(&keys.down)?,
            parse(&keys.left)?,
            parse(&keys.right)?,
        ]))
    }

    /// Arrow keys.
    pub fn arrows() -> Self {
        Self::new([
            KeyChord::new(KEY_UP),
            KeyChord::new(KEY_DOWN),
            KeyChord::new(KEY_LEFT),
            KeyChord::new(KEY_RIGHT),
        ])
    }

    pub fn with_thresholds(mut self, dead_zone: f64, axis_threshold: f64) -> Self {
        self.dead_zone = dead_zone;
        self.axis_threshold = axis_threshold;
        self
    }

    pub fn held(&self) -> impl Iterator<Item = &KeyChord> {
        self.held.iter()
    }

    /// Directions active after the last sample.
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Feed an offset from the cell centre (`dy` positive upwards).
    pub fn sample(&mut self, dx: f64, dy: f64) -> KeyDelta {
        let directions = self.directions_for(dx, dy);
        let desired: BTreeSet<KeyChord> = directions.iter().map(|d| self.key(*d)).collect();
        self.directions = directions;
        self.transition(desired)
    }

    /// Release everything held (pointer left the cell).
    pub fn release_all(&mut self) -> KeyDelta {
        self.directions.clear();
        self.transition(BTreeSet::new())
    }

    /// Active directions joined by `+`, e.g. `"up+left"`.
    pub fn direction_label(&self) -> Option<String> {
        if self.directions.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.directions.iter().map(Direction::name).collect();
        Some(names.join("+"))
    }

    fn key(&self, direction: Direction) -> KeyChord {
        match direction {
            Direction::Up => self.keys[0],
            Direction::Down => self.keys[1],
            Direction::Left => self.keys[2],
            Direction::Right => self.keys[3],
        }
    }

    fn directions_for(&self, dx: f64, dy: f64) -> Vec<Direction> {
        if dx.hypot(dy) < self.dead_zone {
            return Vec::new();
        }
        let t = self.axis_threshold;
        let mut out = Vec::with_capacity(2);
        if dy > t {
            out.push(Direction::Up);
        }
        if dy < -t {
            out.push(Direction::Down);
        }
        if dx < -t {
            out.push(Direction::Left);
        }
        if dx > t {
            out.push(Direction::Right);
        }
        out
    }

    fn transition(&mut self, desired: BTreeSet<KeyChord>) -> KeyDelta {
        let delta = KeyDelta {
            release: self.held.difference(&desired).copied().collect(),
            press: desired.difference(&self.held).copied().collect(),
        };
        self.held = desired;
        delta
    }
}
