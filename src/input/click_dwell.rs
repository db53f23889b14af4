//! Dwell-to-click: rest on the box to arm, then rest the cursor anywhere
//! on screen to click there.
//!
//! ```text
//! Idle ──enter──▶ Dwelling ──still for dwell──▶ Armed
//!   ▲               │ exit                        │ cursor leaves tolerance
//!   │               ▼                             ▼
//!   └──────────── Idle        Click ◀──still── Tracking ◀─┐
//!                                                 │ moved │
//!                                                 └───────┘
//! ```
//!
//! Box enter/exit callbacks are ignored while armed or tracking, since the
//! cursor normally starts on the box and must leave it to reach a target.
//! The caller polls [`ClickDwell::tick`] with the global cursor position.

use std::time::{Duration, Instant};

use crate::geometry::Point;
use crate::model::constants::{CLICK_DWELL_JITTER, CLICK_DWELL_SECS};

/// Outcome of a poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickDwellEvent {
    /// The box dwell completed; now waiting for the cursor to move away.
    Armed,
    /// Click at this position (global coordinates); the control is idle again.
    Click(Point),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dwelling { since: Instant, anchor: Point },
    Armed { at: Point },
    Tracking { since: Instant, anchor: Point },
}

#[derive(Debug, Clone)]
pub struct ClickDwell {
    dwell: Duration,
    jitter: f64,
    state: State,
}

impl Default for ClickDwell {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(CLICK_DWELL_SECS), CLICK_DWELL_JITTER)
    }
}

impl ClickDwell {
    pub fn new(dwell: Duration, jitter: f64) -> Self {
        Self {
            dwell,
            jitter,
            state: State::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// Armed or tracking: the box has been activated and a click is pending.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Armed { .. } | State::Tracking { .. })
    }

    pub fn on_enter(&mut self, now: Instant, at: Point) {
        if self.state == State::Idle {
            self.state = State::Dwelling {
                since: now,
                anchor: at,
            };
        }
    }

    pub fn on_move(&mut self, now: Instant, at: Point) {
        match self.state {
            State::Dwelling { anchor, .. } if anchor.distance(at) > self.jitter => {
                self.state = State::Dwelling {
                    since: now,
                    anchor: at,
                };
            }
            State::Idle => self.on_enter(now, at),
            _ => {}
        }
    }

    pub fn on_exit(&mut self) {
        if let State::Dwelling { .. } = self.state {
            self.state = State::Idle;
        }
    }

    /// Abandon any pending click.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    pub fn tick(&mut self, now: Instant, cursor: Point) -> Option<ClickDwellEvent> {
        match self.state {
            State::Idle => None,
            State::Dwelling { since, anchor } => {
                if anchor.distance(cursor) > self.jitter {
                    self.state = State::Dwelling {
                        since: now,
                        anchor: cursor,
                    };
                    None
                } else if now.duration_since(since) >= self.dwell {
                    self.state = State::Armed { at: cursor };
                    Some(ClickDwellEvent::Armed)
                } else {
                    None
                }
            }
            State::Armed { at } => {
                if at.distance(cursor) > self.jitter {
                    self.state = State::Tracking {
                        since: now,
                        anchor: cursor,
                    };
                }
                None
            }
            State::Tracking { since, anchor } => {
                if anchor.distance(cursor) > self.jitter {
                    self.state = State::Tracking {
                        since: now,
                        anchor: cursor,
                    };
                    None
                } else if now.duration_since(since) >= self.dwell {
                    self.state = State::Idle;
                    Some(ClickDwellEvent::Click(cursor))
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_constants() {
        let c = ClickDwell::default();
        assert_eq!(c.dwell, Duration::from_millis(250));
        assert_eq!(c.jitter, 5.0);
        assert!(c.is_idle());
    }

    #[test]
    fn test_cancel_from_pending() {
        let t0 = Instant::now();
        let p = Point::new(0.0, 0.0);
        let mut c = ClickDwell::default();
        c.on_enter(t0, p);
        c.tick(t0 + Duration::from_millis(300), p);
        assert!(c.is_pending());
        c.cancel();
        assert!(c.is_idle());
    }
}
