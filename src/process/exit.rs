//! Exit status reported by the OS for a process

use crate::core::types::ExitCode;
use std::fmt;

/// Exit code the OS reports for a process that has not terminated yet
pub const STILL_ACTIVE: ExitCode = 259;

/// What the exit-code query says at the moment it is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Process is still running, or exited with 259 itself; only a completed
    /// wait can tell the two apart
    StillActive,
    /// Process terminated with this code
    Exited(ExitCode),
}

impl ExitStatus {
    /// Interprets a raw exit-code query result
    pub const fn from_code(code: ExitCode) -> Self {
        if code == STILL_ACTIVE {
            ExitStatus::StillActive
        } else {
            ExitStatus::Exited(code)
        }
    }

    /// The exit code, if the process has terminated
    pub const fn code(&self) -> Option<ExitCode> {
        match self {
            ExitStatus::StillActive => None,
            ExitStatus::Exited(code) => Some(*code),
        }
    }

    pub const fn is_running(&self) -> bool {
        matches!(self, ExitStatus::StillActive)
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::StillActive => write!(f, "still active"),
            ExitStatus::Exited(code) => write!(f, "exited with code {}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(ExitStatus::from_code(259), ExitStatus::StillActive);
        assert_eq!(ExitStatus::from_code(0), ExitStatus::Exited(0));
        assert_eq!(ExitStatus::from_code(12345), ExitStatus::Exited(12345));
    }

    #[test]
    fn test_accessors() {
        assert!(ExitStatus::StillActive.is_running());
        assert_eq!(ExitStatus::StillActive.code(), None);
        assert_eq!(ExitStatus::Exited(7).code(), Some(7));
        assert_eq!(ExitStatus::Exited(7).to_string(), "exited with code 7");
    }
}
