//! PSAPI.dll bindings for module enumeration

use crate::core::types::{ProcessError, ProcessResult, RawHandleValue};
use crate::windows::utils::string_conv::wide_to_string;
use std::mem;
use winapi::shared::minwindef::{DWORD, FALSE, HMODULE};
use winapi::um::psapi::{EnumProcessModulesEx, GetModuleFileNameExW};
use winapi::um::winnt::HANDLE;

/// `LIST_MODULES_ALL`: both 32-bit and 64-bit modules
pub const LIST_MODULES_ALL: DWORD = 0x03;

/// Fills `modules` with module handles, returning the byte count the OS needs.
///
/// A result larger than the buffer's byte size means the list was truncated.
///
/// # Safety
/// The handle must be a process handle with query and VM-read access
pub unsafe fn enum_process_modules(
    process: RawHandleValue,
    modules: &mut [usize],
) -> ProcessResult<usize> {
    let mut bytes_needed: DWORD = 0;
    let byte_len = mem::size_of_val(modules);

    let result = EnumProcessModulesEx(
        process as HANDLE,
        modules.as_mut_ptr() as *mut HMODULE,
        DWORD::try_from(byte_len).unwrap_or(DWORD::MAX),
        &mut bytes_needed,
        LIST_MODULES_ALL,
    );

    if result == FALSE {
        return Err(ProcessError::last_os_error("EnumProcessModulesEx"));
    }

    Ok(bytes_needed as usize)
}

/// Resolves a module handle to its file path through a buffer of `capacity`
/// UTF-16 units. Longer paths come back truncated.
///
/// # Safety
/// The handle must be a process handle with query and VM-read access
pub unsafe fn get_module_file_name(
    process: RawHandleValue,
    module: usize,
    capacity: usize,
) -> ProcessResult<String> {
    let mut buffer = vec![0u16; capacity.max(1)];

    let length = GetModuleFileNameExW(
        process as HANDLE,
        module as HMODULE,
        buffer.as_mut_ptr(),
        buffer.len() as DWORD,
    );

    if length == 0 {
        return Err(ProcessError::last_os_error("GetModuleFileNameExW"));
    }

    Ok(wide_to_string(&buffer[..length as usize]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_null_handle_operations() {
        unsafe {
            let mut modules = vec![0usize; 4];
            assert!(enum_process_modules(0, &mut modules).is_err());
            assert!(get_module_file_name(0, 0, 260).is_err());
        }
    }
}
