//! winproc: Windows process lifecycle primitives
//!
//! Owned kernel handles, waits over them, process creation from a validated
//! startup configuration, and introspection of a running process (loaded
//! modules and WOW64 architecture).
//!
//! Platform-neutral pieces (configuration, classification, the startup
//! builder, the buffer growth protocol) build on every target; the native
//! calls are only compiled on Windows.

pub mod config;
pub mod core;
pub mod logging;
pub mod process;
pub mod wait;
pub mod windows;

// Re-export main types from core module
pub use crate::core::types::{
    ArchitectureReport, ExitCode, MachineType, ProcessArchitecture, ProcessError, ProcessId,
    ProcessResult, RawHandleValue, ThreadId, Timeout, Wow64Status,
};

pub use crate::process::{
    CreationFlags, ExitStatus, ModuleEnumerator, ProcessAccess, ProcessHandle, ShowWindow,
    StartupConfig, StartupConfigBuilder, StdHandles,
};
#[cfg(windows)]
pub use crate::process::{create, is_wow64, module_names, ProcessHandlePair};
pub use crate::wait::{WaitOutcome, MAXIMUM_WAIT_OBJECTS};
#[cfg(windows)]
pub use crate::wait::{wait_all, wait_any, wait_one, Event, KernelMutex};
pub use crate::windows::{AsHandleValue, OwnedHandle};
