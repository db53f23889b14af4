//! Tests for the cell state machines (dwell, joystick, click dwell).

mod common;

use std::time::{Duration, Instant};

use common::{chord, Posted, RecordingSink};
use dwellpad::geometry::Point;
use dwellpad::input::{
    apply_key_effects, CellBehavior, ClickDwell, ClickDwellEvent, Direction, DwellEffect,
    DwellTracker, InputSink, JoystickMapper, KeyRouter, KeyTarget,
};
use dwellpad::keys::{KeyChord, MouseButton, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};
use dwellpad::model::constants::{CLICK_DWELL_POLL_SECS, JOYSTICK_POLL_SECS};
use dwellpad::model::{Action, ActionKind, JoystickKeys};

const DELAY: Duration = Duration::from_millis(100);

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// === Dwell Tests ===

#[test]
fn dwell_enter_then_fire_presses() {
    let mut t = DwellTracker::new(DELAY);
    assert_eq!(t.on_enter(p(5.0, 5.0)), vec![DwellEffect::Arm(DELAY)]);
    assert!(t.is_armed());
    assert_eq!(t.on_fire(), vec![DwellEffect::Press]);
    assert!(t.is_pressed());
    assert!(!t.is_armed());
}

#[test]
fn dwell_exit_before_fire_cancels_without_key_events() {
    let mut t = DwellTracker::new(DELAY);
    t.on_enter(p(5.0, 5.0));
    assert_eq!(t.on_exit(), vec![DwellEffect::Cancel]);
    // The timer may still fire once after invalidation was requested.
    assert!(t.on_fire().is_empty());
    assert!(!t.is_pressed());
}

#[test]
fn dwell_exit_after_fire_releases() {
    let mut t = DwellTracker::new(DELAY);
    t.on_enter(p(5.0, 5.0));
    t.on_fire();
    assert_eq!(t.on_exit(), vec![DwellEffect::Release]);
    assert!(t.on_exit().is_empty());
}

#[test]
fn dwell_move_while_pressed_releases_and_rearms() {
    let mut t = DwellTracker::new(DELAY);
    t.on_enter(p(5.0, 5.0));
    t.on_fire();
    assert_eq!(
        t.on_move(p(6.0, 5.0)),
        vec![DwellEffect::Release, DwellEffect::Arm(DELAY)]
    );
    assert!(!t.is_pressed());
    assert!(t.is_armed());
}

#[test]
fn dwell_move_while_armed_restarts_timer() {
    let mut t = DwellTracker::new(DELAY);
    t.on_enter(p(5.0, 5.0));
    assert_eq!(
        t.on_move(p(9.0, 9.0)),
        vec![DwellEffect::Cancel, DwellEffect::Arm(DELAY)]
    );
}

#[test]
fn dwell_jitter_ignores_small_moves() {
    let mut t = DwellTracker::new(DELAY).with_jitter(3.0);
    t.on_enter(p(5.0, 5.0));
    assert!(t.on_move(p(6.0, 6.0)).is_empty());
    assert!(!t.on_move(p(20.0, 5.0)).is_empty());
}

#[test]
fn dwell_stale_fire_is_ignored() {
    let mut t = DwellTracker::new(DELAY);
    assert!(t.on_fire().is_empty());
    t.on_enter(p(0.0, 0.0));
    t.on_fire();
    assert!(t.on_fire().is_empty());
}

#[test]
fn apply_key_effects_posts_only_key_events() {
    let c = chord("command+s");
    let mut sink = RecordingSink::default();
    apply_key_effects(
        &[
            DwellEffect::Arm(DELAY),
            DwellEffect::Press,
            DwellEffect::Cancel,
            DwellEffect::Release,
        ],
        &c,
        &mut sink,
    );
    assert_eq!(sink.posted, vec![Posted::Down(c), Posted::Up(c)]);
}

#[test]
fn full_hover_cycle_holds_key_while_resting() {
    let c = chord("space");
    let mut sink = RecordingSink::default();
    let mut t = DwellTracker::new(DELAY);

    apply_key_effects(&t.on_enter(p(1.0, 1.0)), &c, &mut sink);
    apply_key_effects(&t.on_fire(), &c, &mut sink);
    assert_eq!(sink.downs(), vec![c]);
    assert!(sink.ups().is_empty());

    apply_key_effects(&t.on_exit(), &c, &mut sink);
    assert_eq!(sink.ups(), vec![c]);
}

// === Joystick Tests ===

#[test]
fn joystick_dead_zone_holds_nothing() {
    let mut j = JoystickMapper::arrows();
    assert!(j.sample(5.0, 5.0).is_empty());
    assert_eq!(j.held().count(), 0);
    assert_eq!(j.direction_label(), None);
}

#[test]
fn joystick_single_direction() {
    let mut j = JoystickMapper::arrows();
    let delta = j.sample(0.0, 40.0);
    assert_eq!(delta.press, vec![KeyChord::new(KEY_UP)]);
    assert!(delta.release.is_empty());
    assert_eq!(j.directions(), &[Direction::Up]);
    assert_eq!(j.direction_label().as_deref(), Some("up"));
}

#[test]
fn joystick_diagonal_holds_two_keys() {
    let mut j = JoystickMapper::arrows();
    let delta = j.sample(-40.0, -40.0);
    assert_eq!(delta.press.len(), 2);
    assert!(delta.press.contains(&KeyChord::new(KEY_DOWN)));
    assert!(delta.press.contains(&KeyChord::new(KEY_LEFT)));
    assert_eq!(j.direction_label().as_deref(), Some("down+left"));
}

#[test]
fn joystick_only_emits_changes() {
    let mut j = JoystickMapper::arrows();
    j.sample(40.0, 0.0);
    assert!(j.sample(45.0, 2.0).is_empty());

    let delta = j.sample(40.0, 40.0);
    assert_eq!(delta.press, vec![KeyChord::new(KEY_UP)]);
    assert!(delta.release.is_empty());

    let delta = j.sample(0.0, 40.0);
    assert_eq!(delta.release, vec![KeyChord::new(KEY_RIGHT)]);
    assert!(delta.press.is_empty());
}

#[test]
fn joystick_release_all_on_exit() {
    let mut j = JoystickMapper::arrows();
    j.sample(40.0, 40.0);
    let delta = j.release_all();
    assert_eq!(delta.release.len(), 2);
    assert!(delta.press.is_empty());
    assert_eq!(j.held().count(), 0);
    assert!(j.release_all().is_empty());
}

#[test]
fn joystick_delta_releases_before_pressing() {
    let mut j = JoystickMapper::arrows();
    j.sample(40.0, 0.0);
    let mut sink = RecordingSink::default();
    j.sample(-40.0, 0.0).apply(&mut sink);
    assert_eq!(
        sink.posted,
        vec![
            Posted::Up(KeyChord::new(KEY_RIGHT)),
            Posted::Down(KeyChord::new(KEY_LEFT)),
        ]
    );
}

#[test]
fn joystick_custom_keys_and_thresholds() {
    let keys = JoystickKeys {
        up: "w".into(),
        down: "s".into(),
        left: "a".into(),
        right: "d".into(),
        ..JoystickKeys::default()
    };
    let mut j = JoystickMapper::from_keys(&keys)
        .expect("known keys")
        .with_thresholds(0.0, 1.0);
    assert_eq!(j.sample(2.0, 0.0).press, vec![chord("d")]);
}

#[test]
fn joystick_unknown_key_name_is_rejected() {
    let keys = JoystickKeys {
        up: "hyper".into(),
        ..JoystickKeys::default()
    };
    assert!(JoystickMapper::from_keys(&keys).is_none());
}

// === Click Dwell Tests ===

#[test]
fn click_dwell_arms_then_clicks_where_cursor_rests() {
    let t0 = Instant::now();
    let mut c = ClickDwell::new(Duration::from_millis(250), 5.0);
    let on_box = p(100.0, 100.0);
    let target = p(400.0, 300.0);

    c.on_enter(t0, on_box);
    assert_eq!(c.tick(t0 + Duration::from_millis(100), on_box), None);
    assert_eq!(
        c.tick(t0 + Duration::from_millis(260), on_box),
        Some(ClickDwellEvent::Armed)
    );

    // Leaving the box does not disarm.
    c.on_exit();
    assert!(c.is_pending());

    assert_eq!(c.tick(t0 + Duration::from_millis(300), target), None);
    assert_eq!(c.tick(t0 + Duration::from_millis(400), target), None);
    assert_eq!(
        c.tick(t0 + Duration::from_millis(560), target),
        Some(ClickDwellEvent::Click(target))
    );
    assert!(c.is_idle());
}

#[test]
fn click_dwell_exit_before_arming_resets() {
    let t0 = Instant::now();
    let mut c = ClickDwell::default();
    c.on_enter(t0, p(0.0, 0.0));
    c.on_exit();
    assert!(c.is_idle());
    assert_eq!(c.tick(t0 + Duration::from_secs(1), p(0.0, 0.0)), None);
}

#[test]
fn click_dwell_movement_restarts_the_wait() {
    let t0 = Instant::now();
    let mut c = ClickDwell::new(Duration::from_millis(250), 5.0);
    c.on_enter(t0, p(0.0, 0.0));
    c.tick(t0 + Duration::from_millis(200), p(20.0, 0.0));
    assert_eq!(c.tick(t0 + Duration::from_millis(300), p(20.0, 0.0)), None);
    assert_eq!(
        c.tick(t0 + Duration::from_millis(460), p(21.0, 0.0)),
        Some(ClickDwellEvent::Armed)
    );
}

#[test]
fn click_dwell_jitter_within_tolerance_still_clicks() {
    let t0 = Instant::now();
    let mut c = ClickDwell::new(Duration::from_millis(250), 5.0);
    c.on_enter(t0, p(0.0, 0.0));
    c.tick(t0 + Duration::from_millis(250), p(0.0, 0.0));
    c.tick(t0 + Duration::from_millis(300), p(50.0, 50.0));
    assert_eq!(
        c.tick(t0 + Duration::from_millis(560), p(52.0, 51.0)),
        Some(ClickDwellEvent::Click(p(52.0, 51.0)))
    );
}

// === Cell Behavior Tests ===

#[test]
fn cell_behavior_follows_action_kind() {
    let tap = Action::new(0, 0, "return").with_kind(ActionKind::Tap);
    assert!(matches!(
        CellBehavior::from_action(&tap, DELAY),
        CellBehavior::Tap { .. }
    ));

    let click = Action::new(0, 0, "left").with_kind(ActionKind::Click);
    match CellBehavior::from_action(&click, DELAY) {
        CellBehavior::Click { button, .. } => assert_eq!(button, MouseButton::Left),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn dwell_cell_uses_configured_delay() {
    let action = Action::new(1, 2, "a");
    match CellBehavior::from_action(&action, Duration::from_millis(400)) {
        CellBehavior::Dwell { tracker, .. } => {
            assert_eq!(tracker.delay(), Duration::from_millis(400))
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn tap_posts_down_then_up() {
    let c = chord("shift+tab");
    let mut sink = RecordingSink::default();
    sink.tap(&c);
    assert_eq!(sink.posted, vec![Posted::Down(c), Posted::Up(c)]);
}

#[test]
fn poll_interval_follows_cell_kind() {
    let joystick = Action::new(0, 0, "").with_kind(ActionKind::Joystick);
    let click = Action::new(0, 0, "left").with_kind(ActionKind::Click);
    let tap = Action::new(0, 0, "a").with_kind(ActionKind::Tap);

    assert_eq!(
        CellBehavior::from_action(&joystick, DELAY).poll_interval(),
        Some(JOYSTICK_POLL_SECS)
    );
    assert_eq!(
        CellBehavior::from_action(&click, DELAY).poll_interval(),
        Some(CLICK_DWELL_POLL_SECS)
    );
    assert_eq!(CellBehavior::from_action(&tap, DELAY).poll_interval(), None);
    assert_eq!(
        CellBehavior::from_action(&Action::new(0, 0, "a"), DELAY).poll_interval(),
        None
    );
}

// === Key Routing Tests ===

#[test]
fn key_up_follows_key_down_after_focus_change() {
    let c = chord("space");
    let mut router = KeyRouter::new();
    assert_eq!(router.route_down(c, Some(100)), KeyTarget::Process(100));
    assert_eq!(router.held_count(), 1);

    // Another app is frontmost by now; the release still goes to the first.
    assert_eq!(router.route_up(c), KeyTarget::Process(100));
    assert_eq!(router.held_count(), 0);
}

#[test]
fn joystick_keys_release_to_their_own_targets() {
    let (up, left) = (KeyChord::new(KEY_UP), KeyChord::new(KEY_LEFT));
    let mut router = KeyRouter::new();
    router.route_down(up, Some(7));
    router.route_down(left, None);

    assert_eq!(router.route_up(left), KeyTarget::HidTap);
    assert_eq!(router.route_up(up), KeyTarget::Process(7));
}

#[test]
fn unmatched_key_up_goes_to_hid_tap() {
    let mut router = KeyRouter::new();
    assert_eq!(router.route_up(chord("a")), KeyTarget::HidTap);
    assert_eq!(router.held_count(), 0);
}
