//! Per-cell interaction state, built from a preset action.

use std::time::Duration;

use tracing::warn;

use super::{ClickDwell, DwellTracker, JoystickMapper};
use crate::keys::{KeyChord, MouseButton};
use crate::model::constants::{CLICK_DWELL_POLL_SECS, JOYSTICK_POLL_SECS};
use crate::model::{Action, ActionKind};

/// The state machine driving one cell.
#[derive(Debug, Clone)]
pub enum CellBehavior {
    Dwell {
        chord: KeyChord,
        tracker: DwellTracker,
    },
    Tap {
        chord: KeyChord,
    },
    Joystick {
        mapper: JoystickMapper,
    },
    Click {
        button: MouseButton,
        control: ClickDwell,
    },
    /// The action's key could not be resolved; the cell is drawn but does
    /// nothing.
    Inert,
}

impl CellBehavior {
    pub fn from_action(action: &Action, dwell_delay: Duration) -> Self {
        let behavior = match action.kind {
            ActionKind::Dwell => action.chord().map(|chord| CellBehavior::Dwell {
                chord,
                tracker: DwellTracker::new(dwell_delay),
            }),
            ActionKind::Tap => action.chord().map(|chord| CellBehavior::Tap { chord }),
            ActionKind::Joystick => JoystickMapper::from_keys(&action.joystick_keys())
                .map(|mapper| CellBehavior::Joystick { mapper }),
            ActionKind::Click => action.button().map(|button| CellBehavior::Click {
                button,
                control: ClickDwell::default(),
            }),
        };

        behavior.unwrap_or_else(|| {
            warn!(
                "Action at ({}, {}) has unknown key {:?} for {:?}; cell disabled",
                action.x, action.y, action.key, action.kind
            );
            CellBehavior::Inert
        })
    }

    /// Interval of the repeating poll timer the cell needs while hovered.
    pub fn poll_interval(&self) -> Option<f64> {
        match self {
            CellBehavior::Joystick { .. } => Some(JOYSTICK_POLL_SECS),
            CellBehavior::Click { .. } => Some(CLICK_DWELL_POLL_SECS),
            _ => None,
        }
    }

    pub fn polls(&self) -> bool {
        self.poll_interval().is_some()
    }
}
