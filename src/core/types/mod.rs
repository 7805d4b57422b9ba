//! Core type definitions for winproc
//!
//! This module contains the platform-neutral types shared by every layer:
//! the error taxonomy, wait timeouts and machine-type classification.

mod architecture;
mod error;
mod timeout;

// Re-export all public types
pub use architecture::{
    classify_machines, ArchitectureReport, MachineType, ProcessArchitecture, Wow64Status,
};
pub use error::{ProcessError, ProcessResult};
pub use timeout::{Timeout, INFINITE};

// Common type aliases
pub type ProcessId = u32;
pub type ThreadId = u32;
pub type ExitCode = u32;

/// Raw OS handle value, pointer-sized and signed so `-1` sentinels read naturally
pub type RawHandleValue = isize;
