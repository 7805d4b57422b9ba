//! Windows error code handling utilities

use std::fmt;

/// Common Windows error codes seen by process and wait calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    FileNotFound,
    PathNotFound,
    AccessDenied,
    InvalidHandle,
    BadExeFormat,
    InvalidParameter,
    InsufficientBuffer,
    PartialCopy,
    ElevationRequired,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            2 => ErrorCode::FileNotFound,
            3 => ErrorCode::PathNotFound,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            87 => ErrorCode::InvalidParameter,
            122 => ErrorCode::InsufficientBuffer,
            193 => ErrorCode::BadExeFormat,
            299 => ErrorCode::PartialCopy,
            740 => ErrorCode::ElevationRequired,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Get the last Windows error of the calling thread
    #[cfg(windows)]
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(winapi::um::errhandlingapi::GetLastError()) }
    }

    /// Raw numeric code
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::FileNotFound => 2,
            ErrorCode::PathNotFound => 3,
            ErrorCode::AccessDenied => 5,
            ErrorCode::InvalidHandle => 6,
            ErrorCode::InvalidParameter => 87,
            ErrorCode::InsufficientBuffer => 122,
            ErrorCode::BadExeFormat => 193,
            ErrorCode::PartialCopy => 299,
            ErrorCode::ElevationRequired => 740,
            ErrorCode::Unknown(code) => *code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::FileNotFound => write!(f, "File not found"),
            ErrorCode::PathNotFound => write!(f, "Path not found"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::BadExeFormat => write!(f, "Not a valid executable"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::InsufficientBuffer => write!(f, "Insufficient buffer"),
            ErrorCode::PartialCopy => write!(f, "Partial copy"),
            ErrorCode::ElevationRequired => write!(f, "Elevation required"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

/// Renders the system message for a Win32 error code
#[cfg(windows)]
pub fn describe_os_error(code: u32) -> String {
    use ::windows::core::{Error, HRESULT};

    let message = Error::from(HRESULT::from_win32(code)).message().to_string_lossy();
    if message.trim().is_empty() {
        ErrorCode::from(code).to_string()
    } else {
        message.trim_end().to_string()
    }
}

/// Renders the system message for a Win32 error code
#[cfg(not(windows))]
pub fn describe_os_error(code: u32) -> String {
    ErrorCode::from(code).to_string()
}
