//! Core module containing fundamental types for winproc
//!
//! This module provides the foundational building blocks used throughout
//! the crate: error types, timeouts and architecture classification.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    ArchitectureReport, MachineType, ProcessArchitecture, ProcessError, ProcessResult,
    RawHandleValue, Timeout, Wow64Status,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
