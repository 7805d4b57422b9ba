//! Windows-specific type definitions and wrappers

pub mod handle;

// Re-export commonly used types
pub use handle::{is_invalid_value, AsHandleValue, OwnedHandle, ReleaseFn};
