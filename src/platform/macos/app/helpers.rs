//! Small AppKit helpers shared by the windows and views.

use crate::platform::macos::ffi::bridge::{
    get_class, id, msg_send, nil, nsstring_id, NSPoint, NSRect, NSSize, ObjectExt, Sel, NO, YES,
};

/// Create a timer in the common run loop modes (keeps firing during live
/// resize and menu tracking).
///
/// # Safety
/// `target` must respond to `selector`. Main thread only.
pub unsafe fn schedule_timer(target: id, selector: Sel, interval: f64, repeats: bool) -> id {
    let timer: id = msg_send![
        get_class("NSTimer"),
        timerWithTimeInterval: interval,
        target: target,
        selector: selector,
        userInfo: nil,
        repeats: if repeats { YES } else { NO }
    ];
    let run_loop: id = msg_send![get_class("NSRunLoop"), currentRunLoop];
    let _: () = msg_send![run_loop, addTimer: timer, forMode: nsstring_id("kCFRunLoopCommonModes")];
    timer
}

/// Schedule a timer and keep it (retained) in `ivar`, replacing any
/// previous one.
///
/// # Safety
/// `obj` must have an `id` ivar named `ivar` and respond to `selector`.
pub unsafe fn start_timer_ivar(obj: id, ivar: &str, selector: Sel, interval: f64, repeats: bool) {
    invalidate_timer_ivar(obj, ivar);
    let timer = schedule_timer(obj, selector, interval, repeats);
    let _: id = msg_send![timer, retain];
    (*obj).store_ivar::<id>(ivar, timer);
}

/// Invalidate and release the timer stored in `ivar` (if any).
///
/// Safe to call from the timer's own callback and after a one-shot timer
/// has fired.
///
/// # Safety
/// `obj` must have an `id` ivar named `ivar`.
pub unsafe fn invalidate_timer_ivar(obj: id, ivar: &str) {
    let timer: id = *(*obj).load_ivar::<id>(ivar);
    if timer != nil {
        (*obj).store_ivar::<id>(ivar, nil);
        let _: () = msg_send![timer, invalidate];
        let _: () = msg_send![timer, release];
    }
}

/// Whether the timer ivar currently holds a timer.
///
/// # Safety
/// `obj` must have an `id` ivar named `ivar`.
pub unsafe fn has_timer_ivar(obj: id, ivar: &str) -> bool {
    *(*obj).load_ivar::<id>(ivar) != nil
}

/// Non-editable text label.
///
/// # Safety
/// Main thread only.
pub unsafe fn make_label(frame: NSRect, text: &str) -> id {
    let label: id = msg_send![get_class("NSTextField"), alloc];
    let label: id = msg_send![label, initWithFrame: frame];
    let _: () = msg_send![label, setBezeled: NO];
    let _: () = msg_send![label, setDrawsBackground: NO];
    let _: () = msg_send![label, setEditable: NO];
    let _: () = msg_send![label, setSelectable: NO];
    let _: () = msg_send![label, setStringValue: nsstring_id(text)];
    label
}

/// Rounded push button sending `action` to `target`, tagged with `tag`.
///
/// # Safety
/// `target` must respond to `action`. Main thread only.
pub unsafe fn make_button(frame: NSRect, title: &str, target: id, action: Sel, tag: i64) -> id {
    let button: id = msg_send![get_class("NSButton"), alloc];
    let button: id = msg_send![button, initWithFrame: frame];
    let _: () = msg_send![button, setTitle: nsstring_id(title)];
    // NSBezelStyleRounded = 1
    let _: () = msg_send![button, setBezelStyle: 1u64];
    let _: () = msg_send![button, setTarget: target];
    let _: () = msg_send![button, setAction: action];
    let _: () = msg_send![button, setTag: tag];
    button
}

/// A `w` x `h` rect centred on the main screen.
///
/// # Safety
/// Main thread only.
pub unsafe fn centered_on_main_screen(w: f64, h: f64) -> NSRect {
    let screen: id = msg_send![get_class("NSScreen"), mainScreen];
    let frame: NSRect = if screen != nil {
        msg_send![screen, frame]
    } else {
        NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(w, h))
    };
    NSRect::new(
        NSPoint::new(
            frame.origin.x + (frame.size.width - w) / 2.0,
            frame.origin.y + (frame.size.height - h) / 2.0,
        ),
        NSSize::new(w, h),
    )
}

/// Register a `ClassBuilder` class once; later calls return the existing one.
///
/// # Safety
/// `build` must only add ivars and methods with correct signatures.
pub unsafe fn register_class(
    name: &std::ffi::CStr,
    superclass: &str,
    build: impl FnOnce(&mut objc2::runtime::ClassBuilder),
) -> &'static objc2::runtime::AnyClass {
    if let Some(cls) = objc2::runtime::AnyClass::get(name) {
        return cls;
    }
    let superclass = get_class(superclass);
    let mut builder = objc2::runtime::ClassBuilder::new(name, superclass)
        .unwrap_or_else(|| panic!("cannot declare class {:?}", name));
    build(&mut builder);
    builder.register()
}
