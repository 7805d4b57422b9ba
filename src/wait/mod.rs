//! Wait primitives
//!
//! Single, any-of and all-of waits over kernel handles. The raw status of
//! every native wait goes through [`WaitOutcome::classify`] so signaled,
//! abandoned, timed-out and failed results are decoded in one place.

pub mod outcome;
#[cfg(windows)]
pub mod objects;
#[cfg(windows)]
pub mod primitives;

pub use outcome::{
    check_wait_count, prepare_handles, WaitOutcome, MAXIMUM_WAIT_OBJECTS, WAIT_ABANDONED_0,
    WAIT_FAILED, WAIT_OBJECT_0, WAIT_TIMEOUT,
};
#[cfg(windows)]
pub use objects::{Event, KernelMutex};
#[cfg(windows)]
pub use primitives::{wait_all, wait_any, wait_one};
