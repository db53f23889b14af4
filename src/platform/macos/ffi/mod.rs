//! Foreign function interfaces for macOS.

pub mod accessibility;
pub mod bridge;

pub use accessibility::ensure_accessibility_prompt;
