//! Application-wide macOS state and helpers.

pub mod helpers;
pub mod session;

pub use helpers::*;
pub use session::{with_session, PanelHandle, Session, WindowHandle};
