//! Global settings persisted in `config.json`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::constants::*;
use crate::clamp;

/// Last known position of the presets window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: f64,
    pub y: f64,
}

/// Global configuration shared by all presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_window: Option<WindowPosition>,
    /// Alpha applied to every panel window.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Seconds a dwell cell must be hovered before its key is pressed.
    #[serde(default = "default_dwell_delay")]
    pub dwell_delay: f64,
}

fn default_opacity() -> f64 {
    DEFAULT_PANEL_OPACITY
}

fn default_dwell_delay() -> f64 {
    DEFAULT_DWELL_DELAY_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            main_window: None,
            opacity: DEFAULT_PANEL_OPACITY,
            dwell_delay: DEFAULT_DWELL_DELAY_SECS,
        }
    }
}

impl AppConfig {
    /// Clamps all values to valid ranges.
    pub fn validate(&mut self) {
        if !self.opacity.is_finite() {
            self.opacity = DEFAULT_PANEL_OPACITY;
        }
        if !self.dwell_delay.is_finite() {
            self.dwell_delay = DEFAULT_DWELL_DELAY_SECS;
        }
        self.opacity = clamp(self.opacity, MIN_PANEL_OPACITY, MAX_PANEL_OPACITY);
        self.dwell_delay = clamp(self.dwell_delay, MIN_DWELL_DELAY_SECS, MAX_DWELL_DELAY_SECS);
    }

    pub fn dwell_delay(&self) -> Duration {
        Duration::from_secs_f64(self.dwell_delay)
    }
}
