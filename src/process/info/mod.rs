//! Process introspection: loaded modules and WOW64 architecture

pub mod modules;

pub use modules::{base_name, find_module_by_name, query_growable, ModuleEnumerator};
#[cfg(windows)]
pub use modules::module_names;

#[cfg(windows)]
use crate::core::types::{ArchitectureReport, ProcessError, ProcessResult};
#[cfg(windows)]
use crate::windows::types::AsHandleValue;

/// Reports whether the process runs under WOW64 emulation, along with the
/// raw process and native machine types it was classified from.
#[cfg(windows)]
#[tracing::instrument(level = "debug", skip(process))]
pub fn is_wow64<H>(process: &H) -> ProcessResult<ArchitectureReport>
where
    H: AsHandleValue + ?Sized,
{
    use crate::windows::bindings::kernel32;

    if process.is_invalid_handle() {
        return Err(ProcessError::invalid_handle(
            "cannot query architecture through an invalid handle",
        ));
    }

    let (process_machine, native_machine) =
        kernel32::is_wow64_process2(process.as_handle_value())?;
    let report = ArchitectureReport::from_codes(process_machine, native_machine);
    tracing::debug!(status = ?report.status, "Classified process architecture");
    Ok(report)
}

#[cfg(all(test, windows))]
mod tests {
    use super::*;
    use crate::core::types::Wow64Status;
    use crate::process::ProcessHandle;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_current_process_is_native() {
        let handle = ProcessHandle::current().unwrap();
        let report = is_wow64(&handle).unwrap();
        // Test binaries are built for the host architecture
        assert_eq!(report.status, Wow64Status::NotWow64);
        assert_eq!(report.is_wow64(), Some(false));
    }

    #[test]
    fn test_invalid_handle_rejected() {
        assert!(matches!(
            is_wow64(&-1isize),
            Err(ProcessError::InvalidHandle(_))
        ));
    }
}
