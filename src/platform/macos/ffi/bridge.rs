//! Short aliases and helpers over `objc2` for the message-send style used
//! throughout the AppKit layer.
//!
//! Views and controllers here are dynamic `ClassBuilder` classes, so most
//! objects are handled as raw `id` pointers with `msg_send!`.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use std::ffi::CString;

pub use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
pub use objc2::{msg_send, sel, ClassType};
pub use objc2_foundation::{NSPoint, NSRect, NSSize};

use objc2::encode::Encode;
use objc2::rc::Retained;
use objc2_app_kit::NSApplication;
use objc2_foundation::NSString;

use crate::geometry::{Point, Rect};

/// Untyped Objective-C object pointer.
pub type id = *mut AnyObject;

pub const nil: id = std::ptr::null_mut();

/// Objective-C `BOOL` values.
pub const YES: Bool = Bool::YES;
pub const NO: Bool = Bool::NO;

/// The shared `NSApplication`.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    unsafe { msg_send![NSApplication::class(), sharedApplication] }
}

/// Autoreleased `NSString` as a raw pointer, for `msg_send!` arguments.
#[inline]
pub fn nsstring_id(s: &str) -> id {
    let ns = NSString::from_str(s);
    Retained::autorelease_ptr(ns) as id
}

/// Look up a runtime class by name.
///
/// Every name passed here is either an AppKit class or one registered by
/// this crate before first use, so a miss is a programming error.
#[inline]
pub fn get_class(name: &str) -> &'static AnyClass {
    let c_name = CString::new(name).unwrap_or_default();
    AnyClass::get(&c_name).unwrap_or_else(|| panic!("Class '{}' not found", name))
}

pub fn ns_rect(r: Rect) -> NSRect {
    NSRect::new(
        NSPoint::new(r.origin.x, r.origin.y),
        NSSize::new(r.size.width, r.size.height),
    )
}

pub fn rect_from_ns(r: NSRect) -> Rect {
    Rect::new(r.origin.x, r.origin.y, r.size.width, r.size.height)
}

pub fn point_from_ns(p: NSPoint) -> Point {
    Point::new(p.x, p.y)
}

// ============================================================================
// Instance variable access
// ============================================================================

/// Typed access to instance variables of `ClassBuilder` classes.
pub trait ObjectExt {
    /// # Safety
    /// The ivar must exist and be of type T.
    unsafe fn load_ivar<T: Encode>(&self, name: &str) -> &T;

    /// # Safety
    /// The ivar must exist and be of type T.
    unsafe fn load_ivar_mut<T: Encode>(&mut self, name: &str) -> &mut T;

    /// # Safety
    /// The ivar must exist and be of type T.
    unsafe fn store_ivar<T: Encode>(&mut self, name: &str, value: T);
}

fn ivar_name(name: &str) -> CString {
    CString::new(name).unwrap_or_default()
}

impl ObjectExt for AnyObject {
    unsafe fn load_ivar<T: Encode>(&self, name: &str) -> &T {
        let ivar = self
            .class()
            .instance_variable(&ivar_name(name))
            .unwrap_or_else(|| panic!("ivar '{}' not found", name));
        ivar.load::<T>(self)
    }

    unsafe fn load_ivar_mut<T: Encode>(&mut self, name: &str) -> &mut T {
        let ivar = self
            .class()
            .instance_variable(&ivar_name(name))
            .unwrap_or_else(|| panic!("ivar '{}' not found", name));
        ivar.load_mut::<T>(self)
    }

    unsafe fn store_ivar<T: Encode>(&mut self, name: &str, value: T) {
        *self.load_ivar_mut::<T>(name) = value;
    }
}

/// Read a boolean ivar stored as `u8`.
///
/// # Safety
/// `obj` must be valid and have a `u8` ivar named `name`.
pub unsafe fn get_bool_ivar(obj: id, name: &str) -> bool {
    *(*obj).load_ivar::<u8>(name) != 0
}

/// Write a boolean ivar stored as `u8`.
///
/// # Safety
/// `obj` must be valid and have a `u8` ivar named `name`.
pub unsafe fn set_bool_ivar(obj: id, name: &str, val: bool) {
    (*obj).store_ivar::<u8>(name, u8::from(val));
}

/// Run a closure inside an `NSAutoreleasePool`.
#[inline]
pub fn autoreleasepool<R, F: FnOnce() -> R>(f: F) -> R {
    unsafe {
        let pool: id = msg_send![get_class("NSAutoreleasePool"), new];
        let result = f();
        let _: () = msg_send![pool, drain];
        result
    }
}
