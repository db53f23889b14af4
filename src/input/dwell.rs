//! Dwell activation for hotkey cells.
//!
//! Hovering a cell arms a one-shot timer; when it fires the cell's key is
//! pressed and held until the pointer leaves. Moving inside the cell
//! releases the key and starts over, so a key is only ever held while the
//! pointer rests.
//!
//! The tracker owns no clock. The caller schedules and invalidates the real
//! timer according to the returned [`DwellEffect`]s and reports fires back
//! through [`DwellTracker::on_fire`].

use std::time::Duration;

use crate::geometry::Point;
use crate::input::InputSink;
use crate::keys::KeyChord;

/// Instruction for the caller, in the order they must be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellEffect {
    /// Schedule the one-shot timer.
    Arm(Duration),
    /// Invalidate the pending timer.
    Cancel,
    /// Key down.
    Press,
    /// Key up.
    Release,
}

#[derive(Debug, Clone)]
pub struct DwellTracker {
    delay: Duration,
    jitter: f64,
    armed: bool,
    pressed: bool,
    last: Option<Point>,
}

impl DwellTracker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            jitter: 0.0,
            armed: false,
            pressed: false,
            last: None,
        }
    }

    /// Movement up to `jitter` points does not restart the dwell.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.max(0.0);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn on_enter(&mut self, at: Point) -> Vec<DwellEffect> {
        self.restart(at)
    }

    pub fn on_move(&mut self, at: Point) -> Vec<DwellEffect> {
        match self.last {
            Some(last) if last.distance(at) <= self.jitter => Vec::new(),
            _ => self.restart(at),
        }
    }

    pub fn on_exit(&mut self) -> Vec<DwellEffect> {
        let mut effects = Vec::new();
        if self.pressed {
            self.pressed = false;
            effects.push(DwellEffect::Release);
        }
        if self.armed {
            self.armed = false;
            effects.push(DwellEffect::Cancel);
        }
        self.last = None;
        effects
    }

    /// The one-shot timer fired. Ignored unless a dwell is pending.
    pub fn on_fire(&mut self) -> Vec<DwellEffect> {
        if !self.armed {
            return Vec::new();
        }
        self.armed = false;
        self.pressed = true;
        vec![DwellEffect::Press]
    }

    fn restart(&mut self, at: Point) -> Vec<DwellEffect> {
        let mut effects = Vec::with_capacity(3);
        if self.pressed {
            self.pressed = false;
            effects.push(DwellEffect::Release);
        }
        if self.armed {
            effects.push(DwellEffect::Cancel);
        }
        self.armed = true;
        self.last = Some(at);
        effects.push(DwellEffect::Arm(self.delay));
        effects
    }
}

/// Perform the key effects of `effects` on `sink`; timer effects are skipped.
pub fn apply_key_effects(effects: &[DwellEffect], chord: &KeyChord, sink: &mut dyn InputSink) {
    for effect in effects {
        match effect {
            DwellEffect::Press => sink.key_down(chord),
            DwellEffect::Release => sink.key_up(chord),
            DwellEffect::Arm(_) | DwellEffect::Cancel => {}
        }
    }
}
