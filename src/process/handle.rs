//! Opened process handles with explicit access rights

use crate::core::types::{ProcessId, RawHandleValue};
#[cfg(windows)]
use crate::core::types::ProcessResult;
use crate::windows::types::{AsHandleValue, OwnedHandle};
use std::fmt;
use std::ops::BitOr;

/// Access rights for process handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// All possible access rights
    pub const ALL_ACCESS: Self = Self { value: 0x1FFFFF };
    /// Terminate the process
    pub const TERMINATE: Self = Self { value: 0x0001 };
    /// Read memory access, needed for module enumeration
    pub const VM_READ: Self = Self { value: 0x0010 };
    /// Query information access
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Reduced query access, grantable across integrity levels
    pub const QUERY_LIMITED_INFORMATION: Self = Self { value: 0x1000 };
    /// Wait on the process handle
    pub const SYNCHRONIZE: Self = Self { value: 0x0010_0000 };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        let mut value = 0;
        for right in rights {
            value |= right.value;
        }
        Self { value }
    }

    /// Rights needed to list modules and query architecture
    pub fn introspection() -> Self {
        Self::combine(&[Self::QUERY_INFORMATION, Self::VM_READ])
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl BitOr for ProcessAccess {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            value: self.value | rhs.value,
        }
    }
}

/// Handle to an existing process opened by PID
pub struct ProcessHandle {
    handle: OwnedHandle,
    pid: ProcessId,
    access: ProcessAccess,
}

impl ProcessHandle {
    /// Open a process with specified access rights
    #[cfg(windows)]
    pub fn open(pid: ProcessId, access: ProcessAccess) -> ProcessResult<Self> {
        use crate::windows::bindings::kernel32;

        let raw = kernel32::open_process(pid, access.value())?;
        Ok(ProcessHandle {
            handle: OwnedHandle::from_kernel(raw),
            pid,
            access,
        })
    }

    /// Open a process for module listing and architecture queries
    #[cfg(windows)]
    pub fn open_for_introspection(pid: ProcessId) -> ProcessResult<Self> {
        Self::open(pid, ProcessAccess::introspection())
    }

    /// Open the calling process with a real (non-pseudo) handle
    #[cfg(windows)]
    pub fn current() -> ProcessResult<Self> {
        Self::open(
            std::process::id(),
            ProcessAccess::introspection() | ProcessAccess::SYNCHRONIZE,
        )
    }

    /// Wraps an already owned handle
    pub fn from_owned(handle: OwnedHandle, pid: ProcessId, access: ProcessAccess) -> Self {
        ProcessHandle {
            handle,
            pid,
            access,
        }
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Get the access rights
    pub fn access(&self) -> ProcessAccess {
        self.access
    }

    /// Check if handle is valid
    pub fn is_valid(&self) -> bool {
        !self.handle.is_invalid()
    }

    pub fn handle(&self) -> &OwnedHandle {
        &self.handle
    }
}

impl AsHandleValue for ProcessHandle {
    fn as_handle_value(&self) -> RawHandleValue {
        self.handle.raw()
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .field("access", &format!("0x{:X}", self.access.value()))
            .finish()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProcessHandle(pid={}, valid={})",
            self.pid,
            self.is_valid()
        )
    }
}
