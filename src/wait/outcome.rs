//! Wait status classification
//!
//! Native wait calls return a single `u32` whose meaning depends on which
//! range it falls in. Every wait entry point decodes it here and nowhere else.

use crate::core::types::{ProcessError, ProcessResult, RawHandleValue, Timeout};
use crate::windows::types::is_invalid_value;

pub const WAIT_OBJECT_0: u32 = 0x0000_0000;
pub const WAIT_ABANDONED_0: u32 = 0x0000_0080;
pub const WAIT_TIMEOUT: u32 = 0x0000_0102;
pub const WAIT_FAILED: u32 = 0xFFFF_FFFF;

/// Most handles a single multi-object wait accepts
pub const MAXIMUM_WAIT_OBJECTS: usize = 64;

/// Decoded result of a native wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The object at this index was signaled
    Signaled(usize),
    /// The mutex at this index was abandoned by a terminated owner
    Abandoned(usize),
    /// The timeout elapsed first
    TimedOut,
    /// The wait failed; carries the OS error code, or the raw status when it
    /// fell outside every documented range
    Failed(u32),
}

impl WaitOutcome {
    /// Classifies a raw status for a wait over `count` handles.
    ///
    /// `last_error` is only invoked for `WAIT_FAILED`, and must read the
    /// thread's last error before anything else can overwrite it.
    pub fn classify<F>(status: u32, count: usize, last_error: F) -> Self
    where
        F: FnOnce() -> u32,
    {
        let count = count.clamp(1, MAXIMUM_WAIT_OBJECTS) as u32;

        if status < WAIT_OBJECT_0 + count {
            WaitOutcome::Signaled((status - WAIT_OBJECT_0) as usize)
        } else if (WAIT_ABANDONED_0..WAIT_ABANDONED_0 + count).contains(&status) {
            WaitOutcome::Abandoned((status - WAIT_ABANDONED_0) as usize)
        } else if status == WAIT_TIMEOUT {
            WaitOutcome::TimedOut
        } else if status == WAIT_FAILED {
            WaitOutcome::Failed(last_error())
        } else {
            WaitOutcome::Failed(status)
        }
    }

    /// Converts to the caller-facing result: the signaled index or an error
    pub fn into_result(self, timeout: Timeout, context: &str) -> ProcessResult<usize> {
        match self {
            WaitOutcome::Signaled(index) => Ok(index),
            WaitOutcome::Abandoned(index) => Err(ProcessError::Abandoned { index }),
            WaitOutcome::TimedOut => Err(ProcessError::Timeout(timeout)),
            WaitOutcome::Failed(code) => Err(ProcessError::platform(code, context)),
        }
    }

    /// Checks if this outcome is a successful signal
    pub fn is_signaled(&self) -> bool {
        matches!(self, WaitOutcome::Signaled(_))
    }
}

/// Rejects handle counts a single native wait cannot take
pub fn check_wait_count(count: usize) -> ProcessResult<()> {
    if count > MAXIMUM_WAIT_OBJECTS {
        return Err(ProcessError::ArgumentOutOfRange {
            count,
            max: MAXIMUM_WAIT_OBJECTS,
        });
    }
    Ok(())
}

/// Validates a multi-wait argument list before any native call.
///
/// Returns `None` when there is nothing to wait on.
pub fn prepare_handles(values: &[RawHandleValue]) -> ProcessResult<Option<Vec<RawHandleValue>>> {
    check_wait_count(values.len())?;
    if values.is_empty() {
        return Ok(None);
    }
    if let Some(index) = values.iter().position(|&v| is_invalid_value(v)) {
        return Err(ProcessError::invalid_handle(format!(
            "wait handle at index {} is an invalid sentinel",
            index
        )));
    }
    Ok(Some(values.to_vec()))
}
