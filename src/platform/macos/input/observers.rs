//! Application lifecycle observers.

use block2::RcBlock;
use tracing::info;

use crate::platform::macos::app::session;
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, nsstring_id};

/// Persist presets and config when the application terminates, whether
/// through the presets window, the app menu or a system logout.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_termination_observer() {
    let center: id = msg_send![get_class("NSNotificationCenter"), defaultCenter];

    let block = RcBlock::new(move |_note: id| {
        info!("Application terminating, saving state");
        session::persist();
    });

    let name = nsstring_id("NSApplicationWillTerminateNotification");
    let _: id =
        msg_send![center, addObserverForName: name, object: nil, queue: nil, usingBlock: &*block];
}
