//! Windows API layer for process control
//!
//! Provides the handle wrapper, string and error-code helpers, and (on
//! Windows) the raw FFI bindings. All unsafe FFI calls are contained within
//! `bindings` with their failures turned into `ProcessError`s.

#[cfg(windows)]
pub mod bindings;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use types::{AsHandleValue, OwnedHandle};
pub use utils::{describe_os_error, ErrorCode};
