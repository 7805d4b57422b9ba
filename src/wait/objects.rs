//! Kernel synchronization objects that the wait primitives can block on

use crate::core::types::{ProcessResult, RawHandleValue};
use crate::windows::bindings::kernel32;
use crate::windows::types::{AsHandleValue, OwnedHandle};

/// Unnamed kernel event
#[derive(Debug)]
pub struct Event {
    handle: OwnedHandle,
}

impl Event {
    /// Creates an event; manual-reset events stay signaled until `reset`
    pub fn new(manual_reset: bool, initially_set: bool) -> ProcessResult<Self> {
        let raw = kernel32::create_event(manual_reset, initially_set)?;
        Ok(Event {
            handle: OwnedHandle::from_kernel(raw),
        })
    }

    /// Manual-reset event, initially clear
    pub fn manual() -> ProcessResult<Self> {
        Self::new(true, false)
    }

    /// Auto-reset event, initially clear
    pub fn auto() -> ProcessResult<Self> {
        Self::new(false, false)
    }

    pub fn set(&self) -> ProcessResult<()> {
        kernel32::set_event(self.handle.raw())
    }

    pub fn reset(&self) -> ProcessResult<()> {
        kernel32::reset_event(self.handle.raw())
    }

    pub fn handle(&self) -> &OwnedHandle {
        &self.handle
    }
}

impl AsHandleValue for Event {
    fn as_handle_value(&self) -> RawHandleValue {
        self.handle.raw()
    }
}

/// Unnamed kernel mutex.
///
/// Ownership belongs to a thread. If that thread exits while owning it, the
/// next successful wait reports `Abandoned` instead of a plain signal.
#[derive(Debug)]
pub struct KernelMutex {
    handle: OwnedHandle,
}

impl KernelMutex {
    /// Creates a mutex, optionally owned by the calling thread
    pub fn new(initially_owned: bool) -> ProcessResult<Self> {
        let raw = kernel32::create_mutex(initially_owned)?;
        Ok(KernelMutex {
            handle: OwnedHandle::from_kernel(raw),
        })
    }

    /// Releases ownership held by the calling thread
    pub fn release(&self) -> ProcessResult<()> {
        kernel32::release_mutex(self.handle.raw())
    }

    pub fn handle(&self) -> &OwnedHandle {
        &self.handle
    }
}

impl AsHandleValue for KernelMutex {
    fn as_handle_value(&self) -> RawHandleValue {
        self.handle.raw()
    }
}
