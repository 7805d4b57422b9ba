//! Owning HANDLE wrapper with a pluggable release callback

use crate::core::types::RawHandleValue;
use std::fmt;
use tracing::warn;

/// Callback that releases a raw handle, returning whether the release succeeded
pub type ReleaseFn = Box<dyn FnOnce(RawHandleValue) -> bool + Send + Sync>;

/// Anything that can hand a raw handle value to a native call
pub trait AsHandleValue {
    /// Returns the raw handle value without transferring ownership
    fn as_handle_value(&self) -> RawHandleValue;

    /// Whether the value is one of the platform's invalid sentinels
    fn is_invalid_handle(&self) -> bool {
        is_invalid_value(self.as_handle_value())
    }
}

impl<T: AsHandleValue + ?Sized> AsHandleValue for &T {
    fn as_handle_value(&self) -> RawHandleValue {
        (**self).as_handle_value()
    }
}

impl AsHandleValue for RawHandleValue {
    fn as_handle_value(&self) -> RawHandleValue {
        *self
    }
}

/// Zero and all-ones are both treated as "no handle"
pub const fn is_invalid_value(value: RawHandleValue) -> bool {
    value == 0 || value == -1
}

/// Safe wrapper around a raw handle with RAII semantics.
///
/// The release callback runs at most once, and only when the wrapper owns the
/// handle and the value is not an invalid sentinel.
pub struct OwnedHandle {
    value: RawHandleValue,
    owns: bool,
    release: Option<ReleaseFn>,
}

impl OwnedHandle {
    /// Wraps a raw value with an explicit release callback
    pub fn wrap<F>(value: RawHandleValue, owns: bool, release: F) -> Self
    where
        F: FnOnce(RawHandleValue) -> bool + Send + Sync + 'static,
    {
        OwnedHandle {
            value,
            owns,
            release: Some(Box::new(release)),
        }
    }

    /// Wraps a kernel object handle that is released with `CloseHandle`
    #[cfg(windows)]
    pub fn from_kernel(value: RawHandleValue) -> Self {
        use crate::windows::bindings::kernel32;
        Self::wrap(value, true, |v| unsafe { kernel32::close_handle(v) })
    }

    /// Wraps a value this wrapper must never release
    pub fn borrowed(value: RawHandleValue) -> Self {
        OwnedHandle {
            value,
            owns: false,
            release: None,
        }
    }

    /// Create an invalid handle
    pub fn invalid() -> Self {
        Self::borrowed(0)
    }

    /// Get the raw value
    pub fn raw(&self) -> RawHandleValue {
        self.value
    }

    /// Whether the wrapper is responsible for releasing the handle
    pub fn owns(&self) -> bool {
        self.owns
    }

    /// Check if the value is an invalid sentinel
    pub fn is_invalid(&self) -> bool {
        is_invalid_value(self.value)
    }

    /// Whether the release callback has already run or was never pending
    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }

    /// Releases the handle now.
    ///
    /// Idempotent: only the first call on an owned, valid handle invokes the
    /// callback and returns its result. Every other call succeeds without
    /// effect.
    pub fn release(&mut self) -> bool {
        let Some(release) = self.release.take() else {
            return true;
        };
        if !self.owns || self.is_invalid() {
            return true;
        }
        release(self.value)
    }

    /// Take ownership of the raw value, preventing automatic release
    pub fn into_raw(mut self) -> RawHandleValue {
        self.release = None;
        self.value
    }
}

impl AsHandleValue for OwnedHandle {
    fn as_handle_value(&self) -> RawHandleValue {
        self.value
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        if !self.release() {
            warn!(handle = self.value, "failed to release handle");
        }
    }
}

impl fmt::Debug for OwnedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedHandle")
            .field("value", &format!("0x{:X}", self.value))
            .field("owns", &self.owns)
            .field("released", &self.is_released())
            .finish()
    }
}
