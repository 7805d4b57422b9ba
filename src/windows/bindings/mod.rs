//! Windows API bindings
//!
//! Low-level FFI wrappers over kernel32 and psapi. Every wrapper that can
//! fail captures the thread's last error right after the native call.

pub mod kernel32;
pub mod psapi;
