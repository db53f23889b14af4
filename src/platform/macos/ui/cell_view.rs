//! NSView subclass for one action cell.
//!
//! The view owns a boxed [`CellState`] in its `_cell` ivar and forwards
//! tracking-area callbacks and timer fires to the cell's state machine.
//! Timers:
//! - `_dwellTimer`: one-shot dwell timer for dwell cells
//! - `_pollTimer`: repeating sampler for joystick and click cells
//!
//! [`teardown_cell_view`] must run before the view is released (panel
//! close) so held keys are released and timers stop retaining the view.

use std::ffi::c_void;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::geometry::Point;
use crate::input::{apply_key_effects, CellBehavior, ClickDwellEvent, DwellEffect, InputSink};
use crate::model::constants::{CLICK_DWELL_POLL_SECS, JOYSTICK_POLL_SECS};
use crate::model::Action;
use crate::platform::macos::app::{
    has_timer_ivar, invalidate_timer_ivar, register_class, start_timer_ivar,
};
use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, point_from_ns, sel, AnyObject, Bool, ClassBuilder,
    NSPoint, NSRect, NSSize, ObjectExt, Sel, YES,
};
use crate::platform::macos::input::{cursor_location, CgInputSink};

const CLASS_NAME: &std::ffi::CStr = c"DwellpadCellView";

// NSTrackingMouseEnteredAndExited | NSTrackingMouseMoved |
// NSTrackingActiveAlways | NSTrackingInVisibleRect
const TRACKING_OPTIONS: u64 = 0x01 | 0x02 | 0x80 | 0x200;

/// Rust-side state of a cell view.
pub struct CellState {
    label: String,
    /// Transient text shown instead of the label (joystick direction).
    status: Option<String>,
    behavior: CellBehavior,
    sink: CgInputSink,
    highlighted: bool,
}

impl CellState {
    fn new(action: &Action, dwell_delay: Duration) -> Self {
        Self {
            label: action.display_label(),
            status: None,
            behavior: CellBehavior::from_action(action, dwell_delay),
            sink: CgInputSink::default(),
            highlighted: false,
        }
    }
}

// ============================================================================
// Registration and creation
// ============================================================================

unsafe fn cell_class() -> &'static objc2::runtime::AnyClass {
    register_class(CLASS_NAME, "NSView", |builder| {
        builder.add_ivar::<*mut c_void>(c"_cell");
        builder.add_ivar::<id>(c"_dwellTimer");
        builder.add_ivar::<id>(c"_pollTimer");
        register_methods(builder);
    })
}

unsafe fn register_methods(builder: &mut ClassBuilder) {
    builder.add_method(
        sel!(isFlipped),
        is_flipped as unsafe extern "C-unwind" fn(_, _) -> _,
    );
    builder.add_method(
        sel!(acceptsFirstMouse:),
        accepts_first_mouse as unsafe extern "C-unwind" fn(_, _, _) -> _,
    );
    builder.add_method(
        sel!(mouseEntered:),
        mouse_entered as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(mouseMoved:),
        mouse_moved as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(mouseExited:),
        mouse_exited as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(mouseDown:),
        mouse_down as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(dwellFired:),
        dwell_fired as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(pollTick:),
        poll_tick as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(drawRect:),
        draw_rect as unsafe extern "C-unwind" fn(_, _, _),
    );
}

/// Create a cell view for `action`. The caller owns the returned +1
/// reference.
///
/// # Safety
/// Main thread only.
pub unsafe fn create_cell_view(frame: NSRect, action: &Action, dwell_delay: Duration) -> id {
    let view: id = msg_send![cell_class(), alloc];
    let view: id = msg_send![view, initWithFrame: frame];

    let state = Box::new(CellState::new(action, dwell_delay));
    (*view).store_ivar::<*mut c_void>("_cell", Box::into_raw(state) as *mut c_void);
    (*view).store_ivar::<id>("_dwellTimer", nil);
    (*view).store_ivar::<id>("_pollTimer", nil);

    let area: id = msg_send![get_class("NSTrackingArea"), alloc];
    let area: id = msg_send![
        area,
        initWithRect: NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(0.0, 0.0)),
        options: TRACKING_OPTIONS,
        owner: view,
        userInfo: nil
    ];
    let _: () = msg_send![view, addTrackingArea: area];
    let _: () = msg_send![area, release];

    view
}

unsafe fn cell_state<'a>(view: id) -> Option<&'a mut CellState> {
    let ptr = *(*view).load_ivar::<*mut c_void>("_cell");
    (ptr as *mut CellState).as_mut()
}

/// Release held keys, stop timers and cancel pending clicks, keeping the
/// cell usable. Used when a cell is hidden by a grid change.
///
/// # Safety
/// `view` must be a cell view. Main thread only.
pub unsafe fn reset_cell_view(view: id) {
    invalidate_timer_ivar(view, "_dwellTimer");
    invalidate_timer_ivar(view, "_pollTimer");

    let Some(cell) = cell_state(view) else {
        return;
    };
    let CellState {
        behavior,
        sink,
        status,
        highlighted,
        ..
    } = cell;
    match behavior {
        CellBehavior::Dwell { chord, tracker } => apply_key_effects(&tracker.on_exit(), chord, sink),
        CellBehavior::Joystick { mapper } => mapper.release_all().apply(sink),
        CellBehavior::Click { control, .. } => control.cancel(),
        CellBehavior::Tap { .. } | CellBehavior::Inert => {}
    }
    *status = None;
    *highlighted = false;
}

/// Reset the cell and free its state. Idempotent.
///
/// # Safety
/// `view` must be a cell view. Main thread only.
pub unsafe fn teardown_cell_view(view: id) {
    reset_cell_view(view);
    let ptr = *(*view).load_ivar::<*mut c_void>("_cell");
    if !ptr.is_null() {
        (*view).store_ivar::<*mut c_void>("_cell", std::ptr::null_mut());
        drop(Box::from_raw(ptr as *mut CellState));
    }
}

// ============================================================================
// Event handling
// ============================================================================

unsafe fn event_point(view: id, event: id) -> Point {
    let in_window: NSPoint = msg_send![event, locationInWindow];
    let p: NSPoint = msg_send![view, convertPoint: in_window, fromView: nil];
    point_from_ns(p)
}

unsafe fn redraw(view: id) {
    let _: () = msg_send![view, setNeedsDisplay: YES];
}

/// Perform dwell effects: timers on the view, keys on the sink.
unsafe fn run_dwell_effects(view: id, effects: &[DwellEffect], cell: &mut CellState) {
    let CellBehavior::Dwell { chord, .. } = &cell.behavior else {
        return;
    };
    let chord = *chord;
    for effect in effects {
        match *effect {
            DwellEffect::Arm(delay) => {
                start_timer_ivar(
                    view,
                    "_dwellTimer",
                    sel!(dwellFired:),
                    delay.as_secs_f64(),
                    false,
                );
            }
            DwellEffect::Cancel => invalidate_timer_ivar(view, "_dwellTimer"),
            DwellEffect::Press => {
                cell.sink.key_down(&chord);
                cell.highlighted = true;
            }
            DwellEffect::Release => {
                cell.sink.key_up(&chord);
                cell.highlighted = false;
            }
        }
    }
    if effects
        .iter()
        .any(|e| matches!(e, DwellEffect::Press | DwellEffect::Release))
    {
        redraw(view);
    }
}

unsafe fn ensure_poll_timer(view: id, interval: f64) {
    if !has_timer_ivar(view, "_pollTimer") {
        start_timer_ivar(view, "_pollTimer", sel!(pollTick:), interval, true);
    }
}

unsafe extern "C-unwind" fn is_flipped(_this: &AnyObject, _cmd: Sel) -> Bool {
    Bool::YES
}

unsafe extern "C-unwind" fn accepts_first_mouse(_this: &AnyObject, _cmd: Sel, _event: id) -> Bool {
    Bool::YES
}

unsafe extern "C-unwind" fn mouse_entered(this: &mut AnyObject, _cmd: Sel, event: id) {
    let view = this as *mut AnyObject as id;
    let Some(cell) = cell_state(view) else {
        return;
    };
    match &mut cell.behavior {
        CellBehavior::Dwell { tracker, .. } => {
            let effects = tracker.on_enter(event_point(view, event));
            run_dwell_effects(view, &effects, cell);
        }
        CellBehavior::Joystick { .. } => ensure_poll_timer(view, JOYSTICK_POLL_SECS),
        CellBehavior::Click { control, .. } => {
            if let Some(cursor) = cursor_location() {
                control.on_enter(Instant::now(), cursor);
            }
            ensure_poll_timer(view, CLICK_DWELL_POLL_SECS);
        }
        CellBehavior::Tap { .. } => {
            cell.highlighted = true;
            redraw(view);
        }
        CellBehavior::Inert => {}
    }
}

unsafe extern "C-unwind" fn mouse_moved(this: &mut AnyObject, _cmd: Sel, event: id) {
    let view = this as *mut AnyObject as id;
    let Some(cell) = cell_state(view) else {
        return;
    };
    match &mut cell.behavior {
        CellBehavior::Dwell { tracker, .. } => {
            let effects = tracker.on_move(event_point(view, event));
            run_dwell_effects(view, &effects, cell);
        }
        CellBehavior::Click { control, .. } => {
            if let Some(cursor) = cursor_location() {
                control.on_move(Instant::now(), cursor);
            }
        }
        CellBehavior::Joystick { .. } | CellBehavior::Tap { .. } | CellBehavior::Inert => {}
    }
    // No mouseEntered: arrives when the cell appears under a resting pointer.
    if let Some(interval) = cell.behavior.poll_interval() {
        ensure_poll_timer(view, interval);
    }
}

unsafe extern "C-unwind" fn mouse_exited(this: &mut AnyObject, _cmd: Sel, _event: id) {
    let view = this as *mut AnyObject as id;
    let Some(cell) = cell_state(view) else {
        return;
    };
    match &mut cell.behavior {
        CellBehavior::Dwell { tracker, .. } => {
            let effects = tracker.on_exit();
            run_dwell_effects(view, &effects, cell);
        }
        CellBehavior::Joystick { mapper } => {
            invalidate_timer_ivar(view, "_pollTimer");
            mapper.release_all().apply(&mut cell.sink);
            cell.status = None;
            redraw(view);
        }
        CellBehavior::Click { control, .. } => {
            control.on_exit();
            if control.is_idle() {
                invalidate_timer_ivar(view, "_pollTimer");
            }
        }
        CellBehavior::Tap { .. } => {
            cell.highlighted = false;
            redraw(view);
        }
        CellBehavior::Inert => {}
    }
}

unsafe extern "C-unwind" fn mouse_down(this: &mut AnyObject, _cmd: Sel, _event: id) {
    let view = this as *mut AnyObject as id;
    if let Some(cell) = cell_state(view) {
        if let CellBehavior::Tap { chord } = &cell.behavior {
            cell.sink.tap(chord);
        }
    }
}

unsafe extern "C-unwind" fn dwell_fired(this: &mut AnyObject, _cmd: Sel, _timer: id) {
    let view = this as *mut AnyObject as id;
    invalidate_timer_ivar(view, "_dwellTimer");
    let Some(cell) = cell_state(view) else {
        return;
    };
    if let CellBehavior::Dwell { tracker, .. } = &mut cell.behavior {
        let effects = tracker.on_fire();
        run_dwell_effects(view, &effects, cell);
    }
}

unsafe extern "C-unwind" fn poll_tick(this: &mut AnyObject, _cmd: Sel, _timer: id) {
    let view = this as *mut AnyObject as id;
    let Some(cell) = cell_state(view) else {
        invalidate_timer_ivar(view, "_pollTimer");
        return;
    };
    if !cell.behavior.polls() {
        invalidate_timer_ivar(view, "_pollTimer");
        return;
    }
    match &mut cell.behavior {
        CellBehavior::Joystick { mapper } => {
            let window: id = msg_send![view, window];
            if window == nil {
                return;
            }
            let in_window: NSPoint = msg_send![window, mouseLocationOutsideOfEventStream];
            let p: NSPoint = msg_send![view, convertPoint: in_window, fromView: nil];
            let bounds: NSRect = msg_send![view, bounds];
            let dx = p.x - (bounds.origin.x + bounds.size.width / 2.0);
            // Flipped view: y grows downwards, joystick "up" is positive.
            let dy = (bounds.origin.y + bounds.size.height / 2.0) - p.y;

            let delta = mapper.sample(dx, dy);
            if !delta.is_empty() {
                delta.apply(&mut cell.sink);
                cell.status = mapper.direction_label();
                redraw(view);
            }
        }
        CellBehavior::Click { button, control } => {
            let Some(cursor) = cursor_location() else {
                return;
            };
            match control.tick(Instant::now(), cursor) {
                Some(ClickDwellEvent::Armed) => {
                    debug!("click cell armed");
                    cell.highlighted = true;
                    redraw(view);
                }
                Some(ClickDwellEvent::Click(at)) => {
                    cell.sink.click(*button, at);
                    cell.highlighted = false;
                    redraw(view);
                }
                None => {}
            }
            if control.is_idle() {
                invalidate_timer_ivar(view, "_pollTimer");
            }
        }
        CellBehavior::Dwell { .. } | CellBehavior::Tap { .. } | CellBehavior::Inert => {}
    }
}

// ============================================================================
// Drawing
// ============================================================================

unsafe extern "C-unwind" fn draw_rect(this: &AnyObject, _cmd: Sel, _rect: NSRect) {
    let view = this as *const AnyObject as id;
    let Some(cell) = cell_state(view) else {
        return;
    };
    let bounds: NSRect = msg_send![view, bounds];

    let ns_color = get_class("NSColor");
    let ns_bezier = get_class("NSBezierPath");

    let fill: id = if cell.highlighted {
        msg_send![ns_color, systemOrangeColor]
    } else if matches!(cell.behavior, CellBehavior::Inert) {
        msg_send![ns_color, systemGrayColor]
    } else {
        msg_send![ns_color, systemBlueColor]
    };
    let _: () = msg_send![fill, set];
    let _: () = msg_send![ns_bezier, fillRect: bounds];

    let border: id = msg_send![ns_color, blackColor];
    let _: () = msg_send![border, set];
    let path: id = msg_send![ns_bezier, bezierPathWithRect: bounds];
    let _: () = msg_send![path, setLineWidth: 2.0f64];
    let _: () = msg_send![path, stroke];

    let text = cell.status.as_deref().unwrap_or(&cell.label);
    if text.is_empty() {
        return;
    }
    let attrs: id = msg_send![get_class("NSMutableDictionary"), dictionary];
    let font_size = (bounds.size.height.min(bounds.size.width) * 0.3).clamp(10.0, 24.0);
    let font: id = msg_send![get_class("NSFont"), systemFontOfSize: font_size];
    let white: id = msg_send![ns_color, whiteColor];
    let _: () = msg_send![attrs, setObject: font, forKey: nsstring_id("NSFont")];
    let _: () = msg_send![attrs, setObject: white, forKey: nsstring_id("NSColor")];

    let s = nsstring_id(text);
    let size: NSSize = msg_send![s, sizeWithAttributes: attrs];
    let origin = NSPoint::new(
        bounds.origin.x + (bounds.size.width - size.width) / 2.0,
        bounds.origin.y + (bounds.size.height - size.height) / 2.0,
    );
    let _: () = msg_send![s, drawAtPoint: origin, withAttributes: attrs];
}
