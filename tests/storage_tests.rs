//! Tests for preset and config persistence.

mod common;

use std::fs;

use common::approx_eq;
use dwellpad::model::constants::*;
use dwellpad::model::{Action, ActionKind, AppConfig, AppState, Panel, Preset, WindowPosition};
use dwellpad::storage::{
    load_config, load_preset, load_presets, persist_all, save_config, save_preset, AppPaths,
};
use tempfile::TempDir;

const SAMPLE: &str = r#"{
    "name": "Arrows",
    "author": "someone",
    "panels": [
        {
            "width": 3,
            "height": 2,
            "screen_x": 10.0,
            "screen_y": 20.0,
            "screen_width": 300.0,
            "screen_height": 200.0,
            "theme": "dark",
            "actions": [
                { "x": 1, "y": 0, "key": "up" },
                { "x": 1, "y": 1, "key": "", "type": "joystick" },
                { "x": 2, "y": 1, "key": "command+c", "type": "tap", "label": "Copy", "color": "red" }
            ]
        }
    ]
}
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

// === Preset Loading Tests ===

#[test]
fn load_preset_reads_fields_and_path() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "arrows.json", SAMPLE);

    let preset = load_preset(&path).unwrap();
    assert_eq!(preset.name, "Arrows");
    assert_eq!(preset.path.as_deref(), Some(path.as_path()));

    let panel = &preset.panels[0];
    assert_eq!((panel.width, panel.height), (3, 2));
    assert!(approx_eq(panel.screen_width, 300.0));
    assert_eq!(panel.actions.len(), 3);
    assert_eq!(panel.actions[0].kind, ActionKind::Dwell);
    assert_eq!(panel.actions[1].kind, ActionKind::Joystick);
    assert_eq!(panel.actions[2].kind, ActionKind::Tap);
    assert_eq!(panel.actions[2].label.as_deref(), Some("Copy"));
}

#[test]
fn missing_panel_fields_use_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bare.json", r#"{ "name": "Bare", "panels": [ {} ] }"#);

    let panel = &load_preset(&path).unwrap().panels[0];
    assert_eq!(panel.width, DEFAULT_GRID_DIM);
    assert_eq!(panel.height, DEFAULT_GRID_DIM);
    assert!(approx_eq(panel.screen_x, DEFAULT_PANEL_X));
    assert!(approx_eq(panel.screen_y, DEFAULT_PANEL_Y));
    assert!(approx_eq(panel.screen_width, DEFAULT_PANEL_WIDTH));
    assert!(approx_eq(panel.screen_height, DEFAULT_PANEL_HEIGHT));
    assert!(panel.actions.is_empty());
}

#[test]
fn load_presets_sorts_by_file_name_and_skips_malformed() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.json", r#"{ "name": "B" }"#);
    write(&dir, "a.json", r#"{ "name": "A" }"#);
    write(&dir, "broken.json", "{ not json");
    write(&dir, "notes.txt", "ignored");

    let names: Vec<String> = load_presets(dir.path())
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn load_presets_missing_dir_is_empty() {
    let dir = TempDir::new().unwrap();
    assert!(load_presets(&dir.path().join("nope")).is_empty());
}

#[test]
fn load_preset_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.json", "[1, 2");
    let err = load_preset(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.json"));
}

// === Preset Saving Tests ===

#[test]
fn save_then_load_preserves_content_and_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "arrows.json", SAMPLE);

    let mut preset = load_preset(&path).unwrap();
    preset.panels[0].width = 4;
    save_preset(&preset).unwrap();

    let reloaded = load_preset(&path).unwrap();
    assert_eq!(reloaded, preset);
    assert_eq!(reloaded.panels[0].width, 4);
    assert_eq!(reloaded.extra["author"], "someone");
    assert_eq!(reloaded.panels[0].extra["theme"], "dark");
    assert_eq!(reloaded.panels[0].actions[2].extra["color"], "red");
}

#[test]
fn saved_preset_uses_four_space_indent_and_omits_defaults() {
    let dir = TempDir::new().unwrap();
    let mut preset = Preset::new("Keys");
    preset.path = Some(dir.path().join("keys.json"));
    let mut panel = Panel::default();
    panel.actions.push(Action::new(0, 0, "a"));
    preset.panels.push(panel);

    save_preset(&preset).unwrap();
    let text = fs::read_to_string(dir.path().join("keys.json")).unwrap();

    assert!(text.contains("\n    \"name\": \"Keys\""));
    assert!(text.ends_with("}\n"));
    // Dwell is the default kind and is not written out.
    assert!(!text.contains("\"type\""));
    assert!(!text.contains("\"path\""));
}

#[test]
fn save_preset_without_path_fails() {
    assert!(save_preset(&Preset::new("Loose")).is_err());
}

#[test]
fn save_preset_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let mut preset = Preset::new("Nested");
    preset.path = Some(dir.path().join("a/b/nested.json"));
    save_preset(&preset).unwrap();
    assert!(dir.path().join("a/b/nested.json").is_file());
}

#[test]
fn joystick_keys_keep_unknown_fields_and_omit_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "pad.json",
        r#"{ "name": "Pad", "panels": [ { "actions": [
            { "x": 0, "y": 0, "key": "", "type": "joystick",
              "joystick": { "up": "w", "deadzone": 12 } }
        ] } ] }"#,
    );

    let preset = load_preset(&path).unwrap();
    save_preset(&preset).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"up\": \"w\""));
    assert!(text.contains("\"deadzone\": 12"));
    assert!(!text.contains("\"down\""));
    assert!(!text.contains("\"left\""));
    assert!(!text.contains("\"right\""));

    let keys = load_preset(&path).unwrap().panels[0].actions[0].joystick_keys();
    assert_eq!(keys.up, "w");
    assert_eq!(keys.down, "down");
    assert_eq!(keys.extra["deadzone"], 12);
}

#[test]
fn failed_save_leaves_previous_file_intact() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "keep.json", SAMPLE);
    // A directory where the staging file would go makes the write fail.
    fs::create_dir(dir.path().join(".keep.json.tmp")).unwrap();

    let mut preset = load_preset(&path).unwrap();
    preset.panels[0].width = 9;
    assert!(save_preset(&preset).is_err());

    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
}

#[test]
fn successful_save_leaves_no_staging_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "clean.json", SAMPLE);
    save_preset(&load_preset(&path).unwrap()).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["clean.json"]);
}

// === Config Tests ===

#[test]
fn load_config_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        load_config(&dir.path().join("config.json")),
        AppConfig::default()
    );
}

#[test]
fn load_config_malformed_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.json", "opacity = 0.5");
    assert_eq!(load_config(&path), AppConfig::default());
}

#[test]
fn load_config_clamps_out_of_range_values() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.json", r#"{ "opacity": 3.0, "dwell_delay": 0.0 }"#);
    let config = load_config(&path);
    assert!(approx_eq(config.opacity, MAX_PANEL_OPACITY));
    assert!(approx_eq(config.dwell_delay, MIN_DWELL_DELAY_SECS));
}

#[test]
fn config_round_trip_keeps_main_window() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let config = AppConfig {
        main_window: Some(WindowPosition { x: 12.0, y: 34.0 }),
        opacity: 0.5,
        dwell_delay: 0.2,
    };
    save_config(&config, &path).unwrap();
    assert_eq!(load_config(&path), config);
}

// === Persist All Tests ===

#[test]
fn persist_all_writes_presets_and_config() {
    let dir = TempDir::new().unwrap();
    let preset_path = write(&dir, "p.json", r#"{ "name": "P", "panels": [ {} ] }"#);
    let paths = AppPaths::resolve(
        Some(dir.path().to_path_buf()),
        Some(dir.path().join("config.json")),
    );

    let mut state = AppState::new(load_presets(&paths.presets_dir), AppConfig::default());
    state.set_opacity(0.4);
    state.set_main_window_position(1.0, 2.0);
    assert!(state.adjust_grid(0, 0, dwellpad::model::GridAxis::Width, 2));

    assert_eq!(persist_all(&state, &paths), 0);

    assert_eq!(load_preset(&preset_path).unwrap().panels[0].width, 3);
    let config = load_config(&paths.config_file);
    assert!(approx_eq(config.opacity, 0.4));
    assert_eq!(config.main_window, Some(WindowPosition { x: 1.0, y: 2.0 }));
}

#[test]
fn persist_all_counts_failures_and_continues() {
    let dir = TempDir::new().unwrap();
    let paths = AppPaths::resolve(
        Some(dir.path().to_path_buf()),
        Some(dir.path().join("config.json")),
    );
    let state = AppState::new(vec![Preset::new("No path")], AppConfig::default());

    assert_eq!(persist_all(&state, &paths), 1);
    assert!(paths.config_file.is_file());
}

// === Bundled Preset Tests ===

#[test]
fn bundled_presets_load_and_resolve_every_key() {
    use dwellpad::input::CellBehavior;

    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/presets");
    let presets = load_presets(&dir);
    assert_eq!(presets.len(), 2);

    for preset in &presets {
        for panel in &preset.panels {
            let grid = panel.grid(dwellpad::geometry::Size::new(100.0, 100.0));
            for action in &panel.actions {
                assert!(grid.contains_cell(action.x, action.y), "{:?}", action);
                let behavior = CellBehavior::from_action(action, std::time::Duration::ZERO);
                assert!(
                    !matches!(behavior, CellBehavior::Inert),
                    "{} has unresolved key {:?}",
                    preset.name,
                    action.key
                );
            }
        }
    }
}
