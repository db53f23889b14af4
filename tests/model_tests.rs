//! Tests for the model layer (AppState, AppConfig, preset types).
//!
//! Note: We intentionally use `Default::default()` then field reassignment
//! to test individual field validation.
#![allow(clippy::field_reassign_with_default)]

mod common;

use std::time::Duration;

use common::approx_eq;
use dwellpad::clamp;
use dwellpad::geometry::Rect;
use dwellpad::model::constants::*;
use dwellpad::model::{Action, ActionKind, AppConfig, AppState, GridAxis, Panel, Preset};

fn state_with_panels(panels_per_preset: &[usize]) -> AppState {
    let presets = panels_per_preset
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let mut p = Preset::new(format!("preset {i}"));
            p.panels = vec![Panel::default(); n];
            p
        })
        .collect();
    AppState::new(presets, AppConfig::default())
}

// === Clamp Tests ===

#[test]
fn clamp_keeps_inner_value() {
    assert_eq!(clamp(10.0, 0.0, 20.0), 10.0);
}

#[test]
fn clamp_limits_low_and_high() {
    assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
    assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
}

// === Config Validation Tests ===

#[test]
fn config_defaults() {
    let config = AppConfig::default();
    assert!(approx_eq(config.opacity, DEFAULT_PANEL_OPACITY));
    assert!(approx_eq(config.dwell_delay, DEFAULT_DWELL_DELAY_SECS));
    assert!(config.main_window.is_none());
    assert_eq!(config.dwell_delay(), Duration::from_millis(100));
}

#[test]
fn config_validate_clamps_opacity() {
    let mut config = AppConfig::default();
    config.opacity = 0.0;
    config.validate();
    assert!(approx_eq(config.opacity, MIN_PANEL_OPACITY));

    config.opacity = 7.0;
    config.validate();
    assert!(approx_eq(config.opacity, MAX_PANEL_OPACITY));
}

#[test]
fn config_validate_replaces_non_finite_values() {
    let mut config = AppConfig::default();
    config.opacity = f64::NAN;
    config.dwell_delay = f64::INFINITY;
    config.validate();
    assert!(approx_eq(config.opacity, DEFAULT_PANEL_OPACITY));
    assert!(approx_eq(config.dwell_delay, DEFAULT_DWELL_DELAY_SECS));
}

#[test]
fn app_state_new_validates_config() {
    let mut config = AppConfig::default();
    config.dwell_delay = 60.0;
    let state = AppState::new(Vec::new(), config);
    assert!(approx_eq(state.config.dwell_delay, MAX_DWELL_DELAY_SECS));
}

// === Open / Edit Tests ===

#[test]
fn toggle_preset_opens_and_closes() {
    let mut s = state_with_panels(&[1, 1]);
    assert_eq!(s.toggle_preset(1), Some(true));
    assert!(s.is_open(1));
    assert!(!s.is_open(0));
    assert_eq!(s.open_presets().collect::<Vec<_>>(), vec![1]);
    assert_eq!(s.toggle_preset(1), Some(false));
    assert!(!s.is_open(1));
}

#[test]
fn toggle_unknown_preset_is_ignored() {
    let mut s = state_with_panels(&[1]);
    assert_eq!(s.toggle_preset(3), None);
    assert_eq!(s.toggle_edit(3), None);
    assert_eq!(s.open_presets().count(), 0);
}

#[test]
fn edit_opens_closed_preset() {
    let mut s = state_with_panels(&[1]);
    assert_eq!(s.toggle_edit(0), Some(true));
    assert!(s.is_open(0));
    assert!(s.is_editing(0));

    assert_eq!(s.toggle_edit(0), Some(false));
    assert!(s.is_open(0));
    assert!(!s.is_editing(0));
}

#[test]
fn closing_preset_leaves_edit_mode() {
    let mut s = state_with_panels(&[1]);
    s.toggle_edit(0);
    s.toggle_preset(0);
    assert!(!s.is_open(0));
    assert!(!s.is_editing(0));
}

#[test]
fn editor_closed_reports_previous_edit_state() {
    let mut s = state_with_panels(&[1]);
    assert!(!s.editor_closed(0));
    s.toggle_edit(0);
    assert!(s.editor_closed(0));
    assert!(!s.is_editing(0));
    assert!(s.is_open(0));
}

// === Grid Adjustment Tests ===

#[test]
fn adjust_grid_changes_one_axis() {
    let mut s = state_with_panels(&[2]);
    assert!(s.adjust_grid(0, 1, GridAxis::Width, 1));
    assert!(s.adjust_grid(0, 1, GridAxis::Height, 3));
    let panel = &s.presets[0].panels[1];
    assert_eq!((panel.width, panel.height), (2, 4));
    assert_eq!(s.presets[0].panels[0].width, 1);
}

#[test]
fn adjust_grid_never_goes_below_one() {
    let mut s = state_with_panels(&[1]);
    assert!(!s.adjust_grid(0, 0, GridAxis::Width, -1));
    assert!(!s.adjust_grid(0, 0, GridAxis::Height, -5));
    assert_eq!(s.presets[0].panels[0].width, 1);

    s.presets[0].panels[0].width = 0;
    assert!(s.adjust_grid(0, 0, GridAxis::Width, -1));
    assert_eq!(s.presets[0].panels[0].width, 1);
}

#[test]
fn adjust_grid_unknown_panel_is_ignored() {
    let mut s = state_with_panels(&[1]);
    assert!(!s.adjust_grid(0, 4, GridAxis::Width, 1));
    assert!(!s.adjust_grid(9, 0, GridAxis::Width, 1));
}

// === Geometry Recording Tests ===

#[test]
fn set_panel_frame_records_geometry() {
    let mut s = state_with_panels(&[1]);
    let frame = Rect::new(1.0, 2.0, 3.0, 4.0);
    assert!(s.set_panel_frame(0, 0, frame));
    assert_eq!(s.presets[0].panels[0].frame(), frame);
    assert!(!s.set_panel_frame(0, 1, frame));
}

#[test]
fn set_opacity_returns_clamped_value() {
    let mut s = state_with_panels(&[]);
    assert!(approx_eq(s.set_opacity(0.5), 0.5));
    assert!(approx_eq(s.set_opacity(0.01), MIN_PANEL_OPACITY));
    assert!(approx_eq(s.config.opacity, MIN_PANEL_OPACITY));
}

#[test]
fn main_window_position_is_recorded() {
    let mut s = state_with_panels(&[]);
    s.set_main_window_position(100.0, 200.0);
    let pos = s.config.main_window.expect("position set");
    assert!(approx_eq(pos.x, 100.0));
    assert!(approx_eq(pos.y, 200.0));
}

// === Preset Type Tests ===

#[test]
fn display_name_falls_back_to_file_stem() {
    let mut preset = Preset::new("");
    assert_eq!(preset.display_name(), "Preset");
    preset.path = Some("/tmp/gaming.json".into());
    assert_eq!(preset.display_name(), "gaming");
    preset.name = "Named".into();
    assert_eq!(preset.display_name(), "Named");
}

#[test]
fn presets_compare_without_path() {
    let a = Preset::new("Same");
    let mut b = Preset::new("Same");
    b.path = Some("/tmp/other.json".into());
    assert_eq!(a, b);
}

#[test]
fn action_labels() {
    assert_eq!(Action::new(0, 0, "a").display_label(), "a");
    assert_eq!(
        Action::new(0, 0, "").with_kind(ActionKind::Joystick).display_label(),
        "✥"
    );
    assert_eq!(
        Action::new(0, 0, "").with_kind(ActionKind::Click).display_label(),
        "right click"
    );
    let mut labelled = Action::new(0, 0, "command+c");
    labelled.label = Some("Copy".into());
    assert_eq!(labelled.display_label(), "Copy");
}
