//! Blocking wait entry points over native handles

use super::outcome::{prepare_handles, WaitOutcome};
use crate::core::types::{ProcessError, ProcessResult, RawHandleValue, Timeout};
use crate::windows::bindings::kernel32;
use crate::windows::types::{is_invalid_value, AsHandleValue};
use crate::windows::utils::ErrorCode;
use tracing::{instrument, trace};

fn last_error_code() -> u32 {
    ErrorCode::last_error().code()
}

/// Blocks until `handle` is signaled or `timeout` elapses.
///
/// Fails with `InvalidHandle` before waiting when the value is a sentinel,
/// `Timeout` when the wait runs out, `Abandoned` for an orphaned mutex.
#[instrument(level = "trace", skip(handle))]
pub fn wait_one<H>(handle: &H, timeout: Timeout) -> ProcessResult<()>
where
    H: AsHandleValue + ?Sized,
{
    let value = handle.as_handle_value();
    if is_invalid_value(value) {
        return Err(ProcessError::invalid_handle(format!(
            "cannot wait on sentinel value {}",
            value
        )));
    }

    let status = unsafe { kernel32::wait_for_single_object(value, timeout.as_raw()) };
    let outcome = WaitOutcome::classify(status, 1, last_error_code);
    trace!(?outcome, "single wait returned");
    outcome
        .into_result(timeout, "WaitForSingleObject")
        .map(|_| ())
}

/// Blocks until any handle is signaled, returning its index.
///
/// `Ok(None)` means no wait was performed because `handles` was empty.
#[instrument(level = "trace", skip(handles), fields(count = handles.len()))]
pub fn wait_any<H>(handles: &[H], timeout: Timeout) -> ProcessResult<Option<usize>>
where
    H: AsHandleValue,
{
    let Some(values) = prepare_handles(&raw_values(handles))? else {
        return Ok(None);
    };

    let status = unsafe { kernel32::wait_for_multiple_objects(&values, false, timeout.as_raw()) };
    let outcome = WaitOutcome::classify(status, values.len(), last_error_code);
    trace!(?outcome, "wait-any returned");
    outcome
        .into_result(timeout, "WaitForMultipleObjects")
        .map(Some)
}

/// Blocks until every handle is signaled. An empty slice returns immediately.
#[instrument(level = "trace", skip(handles), fields(count = handles.len()))]
pub fn wait_all<H>(handles: &[H], timeout: Timeout) -> ProcessResult<()>
where
    H: AsHandleValue,
{
    let Some(values) = prepare_handles(&raw_values(handles))? else {
        return Ok(());
    };

    let status = unsafe { kernel32::wait_for_multiple_objects(&values, true, timeout.as_raw()) };
    let outcome = WaitOutcome::classify(status, values.len(), last_error_code);
    trace!(?outcome, "wait-all returned");
    outcome
        .into_result(timeout, "WaitForMultipleObjects")
        .map(|_| ())
}

fn raw_values<H: AsHandleValue>(handles: &[H]) -> Vec<RawHandleValue> {
    handles.iter().map(|h| h.as_handle_value()).collect()
}
