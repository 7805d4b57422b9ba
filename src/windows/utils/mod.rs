//! Windows utility functions

pub mod error_codes;
pub mod string_conv;

// Re-export commonly used utilities
pub use error_codes::{describe_os_error, ErrorCode};
pub use string_conv::{string_to_wide, wide_to_string};
