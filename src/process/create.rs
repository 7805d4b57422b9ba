//! Process creation
//!
//! Turns a validated [`StartupConfig`] into the native startup record, runs
//! the creation call and hands back owned handles to the new process and its
//! primary thread.

use crate::core::types::{ExitCode, ProcessError, ProcessId, ProcessResult, ThreadId, Timeout};
use crate::process::exit::ExitStatus;
use crate::process::startup::StartupConfig;
use crate::wait::wait_one;
use crate::windows::bindings::kernel32::{self, CreateProcessArgs};
use crate::windows::types::{AsHandleValue, OwnedHandle};
use crate::windows::utils::string_conv::{path_to_wide, string_to_wide};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};
use winapi::um::processthreadsapi::STARTUPINFOW;
use winapi::um::winbase::{STD_ERROR_HANDLE, STD_INPUT_HANDLE, STD_OUTPUT_HANDLE};

/// Owned handles to a freshly created process and its primary thread.
///
/// Both handles are released when the pair is dropped.
pub struct ProcessHandlePair {
    process: OwnedHandle,
    thread: OwnedHandle,
    pid: ProcessId,
    tid: ThreadId,
}

impl ProcessHandlePair {
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn tid(&self) -> ThreadId {
        self.tid
    }

    pub fn process(&self) -> &OwnedHandle {
        &self.process
    }

    pub fn thread(&self) -> &OwnedHandle {
        &self.thread
    }

    /// Resumes the primary thread, returning its previous suspend count
    pub fn resume(&self) -> ProcessResult<u32> {
        let previous = kernel32::resume_thread(self.thread.raw())?;
        debug!(pid = self.pid, previous, "Resumed primary thread");
        Ok(previous)
    }

    /// Current exit state without waiting
    pub fn exit_status(&self) -> ProcessResult<ExitStatus> {
        let code = kernel32::get_exit_code_process(self.process.raw())?;
        Ok(ExitStatus::from_code(code))
    }

    /// Blocks until the process exits and returns its exit code
    #[instrument(level = "debug", skip(self), fields(pid = self.pid))]
    pub fn wait_for_exit(&self, timeout: Timeout) -> ProcessResult<ExitCode> {
        wait_one(&self.process, timeout)?;
        kernel32::get_exit_code_process(self.process.raw())
    }

    /// Waits for exit on the blocking pool so async callers are not stalled
    pub async fn wait_for_exit_async(
        self: Arc<Self>,
        timeout: Timeout,
    ) -> ProcessResult<ExitCode> {
        tokio::task::spawn_blocking(move || self.wait_for_exit(timeout))
            .await
            .map_err(|e| ProcessError::TaskJoin(e.to_string()))?
    }

    /// Forces the process to exit with the given code
    pub fn terminate(&self, exit_code: ExitCode) -> ProcessResult<()> {
        kernel32::terminate_process(self.process.raw(), exit_code)?;
        debug!(pid = self.pid, exit_code, "Terminated process");
        Ok(())
    }

    /// Releases both handles now; true when both closed cleanly
    pub fn close(mut self) -> bool {
        let process = self.process.release();
        let thread = self.thread.release();
        process && thread
    }
}

impl AsHandleValue for ProcessHandlePair {
    fn as_handle_value(&self) -> crate::core::types::RawHandleValue {
        self.process.raw()
    }
}

impl fmt::Debug for ProcessHandlePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandlePair")
            .field("pid", &self.pid)
            .field("tid", &self.tid)
            .field("process", &self.process)
            .field("thread", &self.thread)
            .finish()
    }
}

fn std_or_parent(value: Option<isize>, which: u32) -> isize {
    value.unwrap_or_else(|| kernel32::get_std_handle(which))
}

/// Creates a process described by `config`.
///
/// On success the returned pair owns both handles; on failure nothing is
/// leaked and the OS error is returned.
#[instrument(level = "debug", skip(config), fields(command_line = config.command_line()))]
pub fn create(config: &StartupConfig) -> ProcessResult<ProcessHandlePair> {
    // Buffers referenced by the startup record must outlive the native call
    let mut command_line = config.command_line_buffer();
    let application = config.application().map(path_to_wide);
    let current_directory = config.current_directory().map(path_to_wide);
    let environment = config.environment_block();
    let mut desktop = config.desktop().map(string_to_wide);
    let mut title = config.title().map(string_to_wide);

    let mut startup: STARTUPINFOW = unsafe { std::mem::zeroed() };
    startup.cb = std::mem::size_of::<STARTUPINFOW>() as u32;
    startup.dwFlags = config.startup_flags();

    if let Some(show) = config.show_window() {
        startup.wShowWindow = show.code();
    }
    if let Some((x, y)) = config.position() {
        startup.dwX = x;
        startup.dwY = y;
    }
    if let Some((width, height)) = config.size() {
        startup.dwXSize = width;
        startup.dwYSize = height;
    }
    if let Some(buffer) = desktop.as_mut() {
        startup.lpDesktop = buffer.as_mut_ptr();
    }
    if let Some(buffer) = title.as_mut() {
        startup.lpTitle = buffer.as_mut_ptr();
    }
    if let Some(handles) = config.std_handles() {
        startup.hStdInput = std_or_parent(handles.input, STD_INPUT_HANDLE) as _;
        startup.hStdOutput = std_or_parent(handles.output, STD_OUTPUT_HANDLE) as _;
        startup.hStdError = std_or_parent(handles.error, STD_ERROR_HANDLE) as _;
    }

    let args = CreateProcessArgs {
        application: application.as_deref(),
        command_line: &mut command_line,
        inherit_handles: config.inherit_handles(),
        creation_flags: config.effective_creation_flags().value(),
        environment: environment.as_deref(),
        current_directory: current_directory.as_deref(),
    };

    let info = unsafe { kernel32::create_process(args, &mut startup)? };

    let pair = ProcessHandlePair {
        process: OwnedHandle::from_kernel(info.hProcess as isize),
        thread: OwnedHandle::from_kernel(info.hThread as isize),
        pid: info.dwProcessId,
        tid: info.dwThreadId,
    };

    debug!(pid = pair.pid, tid = pair.tid, "Created process");
    Ok(pair)
}
