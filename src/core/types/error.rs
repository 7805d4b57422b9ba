//! Custom error types for winproc

use super::timeout::Timeout;
use crate::windows::utils::describe_os_error;
use thiserror::Error;

/// Main error type for process lifecycle operations
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Wait timed out after {0}")]
    Timeout(Timeout),

    #[error("Wait object {index} was abandoned by its previous owner")]
    Abandoned { index: usize },

    #[error("{context} failed with OS error {code}")]
    Platform { code: u32, context: String },

    #[error("Handle count {count} exceeds the maximum of {max} wait objects")]
    ArgumentOutOfRange { count: usize, max: usize },

    #[error("Command line is {length} UTF-16 units, the limit is {max}")]
    CommandLineTooLong { length: usize, max: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Module list kept growing after {rounds} resize rounds")]
    ModuleListUnstable { rounds: usize },

    #[error("Blocking task failed: {0}")]
    TaskJoin(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for process operations
pub type ProcessResult<T> = Result<T, ProcessError>;

impl ProcessError {
    /// Creates a platform error from the calling thread's last OS error.
    ///
    /// Must be called directly after the failing native call, before anything
    /// else has a chance to overwrite the thread's last-error slot.
    pub fn last_os_error(context: impl Into<String>) -> Self {
        let code = std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or_default() as u32;
        Self::platform(code, context)
    }

    /// Creates a platform error with an explicit code
    pub fn platform(code: u32, context: impl Into<String>) -> Self {
        ProcessError::Platform {
            code,
            context: context.into(),
        }
    }

    /// Creates an invalid handle error
    pub fn invalid_handle(reason: impl Into<String>) -> Self {
        ProcessError::InvalidHandle(reason.into())
    }

    /// Creates an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        ProcessError::InvalidArgument(reason.into())
    }

    /// Returns the OS error code for platform failures
    pub fn os_code(&self) -> Option<u32> {
        match self {
            ProcessError::Platform { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// System message for platform failures, e.g. "Access is denied."
    pub fn os_message(&self) -> Option<String> {
        self.os_code().map(describe_os_error)
    }

    /// Whether this error is a bounded wait running out
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProcessError::Timeout(_))
    }
}
