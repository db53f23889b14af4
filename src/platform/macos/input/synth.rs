//! Quartz event synthesis.
//!
//! Key-downs go to the frontmost application's process when there is one,
//! otherwise to the HID event tap. Each key-up follows its key-down, so a
//! held key is released in the app that received it. Mouse clicks always go
//! through the HID tap so they land on whatever window is under the cursor.

use core_graphics::event::{
    CGEvent, CGEventFlags, CGEventTapLocation, CGEventType, CGMouseButton,
};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGPoint;
use tracing::{debug, warn};

use crate::geometry::Point;
use crate::input::{InputSink, KeyRouter, KeyTarget};
use crate::keys::{KeyChord, Modifiers, MouseButton};
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil};

/// [`InputSink`] posting CGEvents.
#[derive(Debug, Default, Clone)]
pub struct CgInputSink {
    router: KeyRouter,
}

fn event_source() -> Option<CGEventSource> {
    CGEventSource::new(CGEventSourceStateID::HIDSystemState).ok()
}

fn cg_flags(modifiers: Modifiers) -> CGEventFlags {
    let mut flags = CGEventFlags::empty();
    if modifiers.command {
        flags |= CGEventFlags::CGEventFlagCommand;
    }
    if modifiers.control {
        flags |= CGEventFlags::CGEventFlagControl;
    }
    if modifiers.shift {
        flags |= CGEventFlags::CGEventFlagShift;
    }
    if modifiers.option {
        flags |= CGEventFlags::CGEventFlagAlternate;
    }
    flags
}

/// Process id of the frontmost application, if any.
fn frontmost_pid() -> Option<i32> {
    unsafe {
        let ws: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
        let app: id = msg_send![ws, frontmostApplication];
        if app == nil {
            return None;
        }
        let pid: i32 = msg_send![app, processIdentifier];
        (pid > 0).then_some(pid)
    }
}

/// Current cursor position in Quartz global coordinates (top-left origin).
pub fn cursor_location() -> Option<Point> {
    let source = event_source()?;
    let event = CGEvent::new(source).ok()?;
    let p = event.location();
    Some(Point::new(p.x, p.y))
}

impl CgInputSink {
    fn post_key(&mut self, chord: &KeyChord, keydown: bool) {
        let Some(source) = event_source() else {
            warn!("Cannot create HID event source");
            return;
        };
        let Ok(event) = CGEvent::new_keyboard_event(source, chord.code.0, keydown) else {
            warn!("Cannot create keyboard event for keycode {:#04x}", chord.code.0);
            return;
        };
        if !chord.modifiers.is_empty() {
            event.set_flags(cg_flags(chord.modifiers));
        }
        let target = if keydown {
            self.router.route_down(*chord, frontmost_pid())
        } else {
            self.router.route_up(*chord)
        };
        match target {
            KeyTarget::Process(pid) => event.post_to_pid(pid),
            KeyTarget::HidTap => event.post(CGEventTapLocation::HID),
        }
        debug!(
            "key {} {:#04x} {:?} -> {:?}",
            if keydown { "down" } else { "up" },
            chord.code.0,
            chord.modifiers,
            target
        );
    }

    fn post_mouse(&self, kind: CGEventType, at: CGPoint, button: CGMouseButton) {
        let Some(source) = event_source() else {
            warn!("Cannot create HID event source");
            return;
        };
        match CGEvent::new_mouse_event(source, kind, at, button) {
            Ok(event) => event.post(CGEventTapLocation::HID),
            Err(_) => warn!("Cannot create mouse event"),
        }
    }
}

impl InputSink for CgInputSink {
    fn key_down(&mut self, chord: &KeyChord) {
        self.post_key(chord, true);
    }

    fn key_up(&mut self, chord: &KeyChord) {
        self.post_key(chord, false);
    }

    fn click(&mut self, button: MouseButton, at: Point) {
        let (down, up, cg_button) = match button {
            MouseButton::Left => (
                CGEventType::LeftMouseDown,
                CGEventType::LeftMouseUp,
                CGMouseButton::Left,
            ),
            MouseButton::Right => (
                CGEventType::RightMouseDown,
                CGEventType::RightMouseUp,
                CGMouseButton::Right,
            ),
            MouseButton::Middle => (
                CGEventType::OtherMouseDown,
                CGEventType::OtherMouseUp,
                CGMouseButton::Center,
            ),
        };
        let point = CGPoint::new(at.x, at.y);
        self.post_mouse(down, point, cg_button);
        self.post_mouse(up, point, cg_button);
        debug!("{:?} click at ({:.0}, {:.0})", button, at.x, at.y);
    }
}
