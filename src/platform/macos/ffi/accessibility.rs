//! Accessibility (TCC) permission check.
//!
//! Posting keyboard events to other applications requires the process to
//! be trusted for Accessibility.

use std::ffi::c_void;

use tracing::{info, warn};

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    static kCFBooleanTrue: *const c_void;
    static kCFTypeDictionaryKeyCallBacks: c_void;
    static kCFTypeDictionaryValueCallBacks: c_void;

    fn CFDictionaryCreate(
        allocator: *const c_void,
        keys: *const *const c_void,
        values: *const *const c_void,
        num_values: isize,
        key_callbacks: *const c_void,
        value_callbacks: *const c_void,
    ) -> *const c_void;

    fn CFRelease(cf: *const c_void);
}

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrustedWithOptions(options: *const c_void) -> bool;

    static kAXTrustedCheckOptionPrompt: *const c_void;
}

/// Check Accessibility trust, showing the system prompt if not yet granted.
///
/// Returns whether the process is currently trusted.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn ensure_accessibility_prompt() -> bool {
    let keys = [kAXTrustedCheckOptionPrompt];
    let values = [kCFBooleanTrue];

    let dict = CFDictionaryCreate(
        std::ptr::null(),
        keys.as_ptr(),
        values.as_ptr(),
        1,
        &kCFTypeDictionaryKeyCallBacks as *const c_void,
        &kCFTypeDictionaryValueCallBacks as *const c_void,
    );

    let trusted = AXIsProcessTrustedWithOptions(dict);

    if !dict.is_null() {
        CFRelease(dict);
    }

    if trusted {
        info!("Accessibility access granted");
    } else {
        warn!("Accessibility access not granted; key events will be ignored by other apps");
    }
    trusted
}
