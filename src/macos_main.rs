//! macOS-specific entry point and application logic.
//!
//! Builds the presets window, installs the session and observers, then runs
//! the AppKit loop. Panel, editor and settings windows are created later by
//! the dispatcher in response to events.

use dwellpad::model::constants::{EVENT_PUMP_SECS, MAIN_WINDOW_TITLE};
use dwellpad::model::AppState;
use dwellpad::platform::macos::app::{schedule_timer, session, Session};
use dwellpad::platform::macos::ffi::bridge::{
    autoreleasepool, get_class, id, msg_send, nil, nsstring_id, sel, NSApp, YES,
};
use dwellpad::platform::macos::ffi::ensure_accessibility_prompt;
use dwellpad::platform::macos::input::install_termination_observer;
use dwellpad::platform::macos::ui::{create_controller, create_presets_window};
use dwellpad::storage::AppPaths;
use tracing::info;

/// Main entry point for macOS.
pub fn run(state: AppState, paths: AppPaths) {
    // Event bus is already initialized by main()

    autoreleasepool(|| {
        unsafe {
            // Posting key events needs Accessibility permission
            ensure_accessibility_prompt();

            let app = NSApp();
            // NSApplicationActivationPolicyRegular = 0
            let _: bool = msg_send![app, setActivationPolicy: 0i64];

            install_app_menu(app);

            let controller = create_controller();
            let window = create_presets_window(controller, &state.presets, &state.config);

            let mut session = Session::new(state, paths);
            session.toggles = window.toggles;
            session::install(session);

            install_termination_observer();

            // Drains the event bus on the main thread
            let _ = schedule_timer(controller, sel!(pumpEvents:), EVENT_PUMP_SECS, true);

            info!("Ready");
            let _: () = msg_send![app, activateIgnoringOtherApps: YES];
            let _: () = msg_send![app, run];
        }
    });
}

/// Minimal main menu so Cmd-Q quits (and persists through the termination
/// observer).
///
/// # Safety
/// Main thread only.
unsafe fn install_app_menu(app: id) {
    let menu_class = get_class("NSMenu");
    let item_class = get_class("NSMenuItem");

    let main_menu: id = msg_send![menu_class, new];
    let app_item: id = msg_send![item_class, new];
    let _: () = msg_send![main_menu, addItem: app_item];

    let app_menu: id = msg_send![menu_class, new];
    let quit_title = format!("Quit {}", MAIN_WINDOW_TITLE);
    let quit: id = msg_send![item_class, alloc];
    let quit: id = msg_send![
        quit,
        initWithTitle: nsstring_id(&quit_title),
        action: sel!(terminate:),
        keyEquivalent: nsstring_id("q")
    ];
    let _: () = msg_send![quit, setTarget: nil];
    let _: () = msg_send![app_menu, addItem: quit];
    let _: () = msg_send![app_item, setSubmenu: app_menu];
    let _: () = msg_send![app, setMainMenu: main_menu];

    let _: () = msg_send![quit, release];
    let _: () = msg_send![app_menu, release];
    let _: () = msg_send![app_item, release];
    let _: () = msg_send![main_menu, release];
}
