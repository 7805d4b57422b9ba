//! Kernel32.dll bindings for process, thread and wait operations

use crate::core::types::{ProcessError, ProcessResult, RawHandleValue};
use std::ptr;
use winapi::shared::minwindef::{BOOL, DWORD, FALSE, TRUE, USHORT};
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::{
    CreateProcessW, GetExitCodeProcess, OpenProcess, ResumeThread, TerminateProcess,
    PROCESS_INFORMATION, STARTUPINFOW,
};
use winapi::um::synchapi::{
    CreateEventW, CreateMutexW, ReleaseMutex, ResetEvent, SetEvent, WaitForMultipleObjects,
    WaitForSingleObject,
};
use winapi::um::winnt::HANDLE;

// Not exported by winapi 0.3; available since Windows 10 1511.
#[link(name = "kernel32")]
extern "system" {
    fn IsWow64Process2(
        process: HANDLE,
        process_machine: *mut USHORT,
        native_machine: *mut USHORT,
    ) -> BOOL;
}

fn as_handle(value: RawHandleValue) -> HANDLE {
    value as HANDLE
}

fn as_bool(value: bool) -> BOOL {
    if value {
        TRUE
    } else {
        FALSE
    }
}

/// Closes a kernel handle via CloseHandle, returning whether it succeeded
///
/// # Safety
/// The value must be a kernel handle owned by the caller
pub unsafe fn close_handle(value: RawHandleValue) -> bool {
    CloseHandle(as_handle(value)) != FALSE
}

/// Safe wrapper for OpenProcess
pub fn open_process(pid: u32, desired_access: u32) -> ProcessResult<RawHandleValue> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if handle.is_null() {
            Err(ProcessError::last_os_error(format!("OpenProcess({})", pid)))
        } else {
            Ok(handle as RawHandleValue)
        }
    }
}

/// Raw WaitForSingleObject; the status is classified by the caller
///
/// # Safety
/// The value must be a live waitable handle for the whole call
pub unsafe fn wait_for_single_object(value: RawHandleValue, millis: u32) -> u32 {
    WaitForSingleObject(as_handle(value), millis)
}

/// Raw WaitForMultipleObjects; the status is classified by the caller
///
/// # Safety
/// Every value must be a live waitable handle for the whole call, and the
/// slice must not exceed `MAXIMUM_WAIT_OBJECTS`
pub unsafe fn wait_for_multiple_objects(
    values: &[RawHandleValue],
    wait_all: bool,
    millis: u32,
) -> u32 {
    let handles: Vec<HANDLE> = values.iter().map(|&v| as_handle(v)).collect();
    WaitForMultipleObjects(
        handles.len() as DWORD,
        handles.as_ptr(),
        as_bool(wait_all),
        millis,
    )
}

/// Native buffers for one CreateProcessW call, all NUL-terminated UTF-16
pub struct CreateProcessArgs<'a> {
    pub application: Option<&'a [u16]>,
    pub command_line: &'a mut [u16],
    pub inherit_handles: bool,
    pub creation_flags: u32,
    pub environment: Option<&'a [u16]>,
    pub current_directory: Option<&'a [u16]>,
}

/// Calls CreateProcessW with the given buffers and startup record
///
/// # Safety
/// `startup_info` must be fully initialized with `cb` set, and every pointer
/// it carries must outlive the call
pub unsafe fn create_process(
    args: CreateProcessArgs<'_>,
    startup_info: &mut STARTUPINFOW,
) -> ProcessResult<PROCESS_INFORMATION> {
    let mut info: PROCESS_INFORMATION = std::mem::zeroed();

    let ok = CreateProcessW(
        args.application.map_or(ptr::null(), |a| a.as_ptr()),
        args.command_line.as_mut_ptr(),
        ptr::null_mut(),
        ptr::null_mut(),
        as_bool(args.inherit_handles),
        args.creation_flags,
        args.environment
            .map_or(ptr::null_mut(), |e| e.as_ptr() as *mut _),
        args.current_directory.map_or(ptr::null(), |d| d.as_ptr()),
        startup_info,
        &mut info,
    );

    if ok == FALSE {
        Err(ProcessError::last_os_error("CreateProcessW"))
    } else {
        Ok(info)
    }
}

/// Safe wrapper for GetExitCodeProcess
pub fn get_exit_code_process(process: RawHandleValue) -> ProcessResult<u32> {
    let mut code: DWORD = 0;
    unsafe {
        if GetExitCodeProcess(as_handle(process), &mut code) == FALSE {
            return Err(ProcessError::last_os_error("GetExitCodeProcess"));
        }
    }
    Ok(code)
}

/// Safe wrapper for ResumeThread, returning the previous suspend count
pub fn resume_thread(thread: RawHandleValue) -> ProcessResult<u32> {
    let previous = unsafe { ResumeThread(as_handle(thread)) };
    if previous == DWORD::MAX {
        Err(ProcessError::last_os_error("ResumeThread"))
    } else {
        Ok(previous)
    }
}

/// Safe wrapper for TerminateProcess
pub fn terminate_process(process: RawHandleValue, exit_code: u32) -> ProcessResult<()> {
    unsafe {
        if TerminateProcess(as_handle(process), exit_code) == FALSE {
            return Err(ProcessError::last_os_error("TerminateProcess"));
        }
    }
    Ok(())
}

/// Safe wrapper for GetStdHandle; null or invalid values pass through
pub fn get_std_handle(which: DWORD) -> RawHandleValue {
    unsafe { winapi::um::processenv::GetStdHandle(which) as RawHandleValue }
}

/// Safe wrapper for IsWow64Process2, returning (process machine, native machine)
pub fn is_wow64_process2(process: RawHandleValue) -> ProcessResult<(u16, u16)> {
    let mut process_machine: USHORT = 0;
    let mut native_machine: USHORT = 0;
    unsafe {
        if IsWow64Process2(
            as_handle(process),
            &mut process_machine,
            &mut native_machine,
        ) == FALSE
        {
            return Err(ProcessError::last_os_error("IsWow64Process2"));
        }
    }
    Ok((process_machine, native_machine))
}

/// Safe wrapper for CreateEventW (unnamed, default security)
pub fn create_event(manual_reset: bool, initial_state: bool) -> ProcessResult<RawHandleValue> {
    let handle = unsafe {
        CreateEventW(
            ptr::null_mut(),
            as_bool(manual_reset),
            as_bool(initial_state),
            ptr::null(),
        )
    };
    if handle.is_null() {
        Err(ProcessError::last_os_error("CreateEventW"))
    } else {
        Ok(handle as RawHandleValue)
    }
}

/// Safe wrapper for SetEvent
pub fn set_event(event: RawHandleValue) -> ProcessResult<()> {
    if unsafe { SetEvent(as_handle(event)) } == FALSE {
        return Err(ProcessError::last_os_error("SetEvent"));
    }
    Ok(())
}

/// Safe wrapper for ResetEvent
pub fn reset_event(event: RawHandleValue) -> ProcessResult<()> {
    if unsafe { ResetEvent(as_handle(event)) } == FALSE {
        return Err(ProcessError::last_os_error("ResetEvent"));
    }
    Ok(())
}

/// Safe wrapper for CreateMutexW (unnamed, default security)
pub fn create_mutex(initial_owner: bool) -> ProcessResult<RawHandleValue> {
    let handle = unsafe { CreateMutexW(ptr::null_mut(), as_bool(initial_owner), ptr::null()) };
    if handle.is_null() {
        Err(ProcessError::last_os_error("CreateMutexW"))
    } else {
        Ok(handle as RawHandleValue)
    }
}

/// Safe wrapper for ReleaseMutex
pub fn release_mutex(mutex: RawHandleValue) -> ProcessResult<()> {
    if unsafe { ReleaseMutex(as_handle(mutex)) } == FALSE {
        return Err(ProcessError::last_os_error("ReleaseMutex"));
    }
    Ok(())
}
