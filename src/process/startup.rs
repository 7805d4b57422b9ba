//! Process startup configuration
//!
//! [`StartupConfigBuilder`] collects the semantic fields of a launch and
//! validates them into an immutable [`StartupConfig`]. The native
//! `STARTUPINFOW` record is only assembled from it inside the creation call.

use crate::config::LaunchConfig;
use crate::core::types::{ProcessError, ProcessResult, RawHandleValue};
use crate::windows::utils::string_conv::{string_to_wide, wide_len};
use serde::{Deserialize, Serialize};
use std::ops::BitOr;
use std::path::{Path, PathBuf};

/// Longest command line the native call accepts, terminator included
pub const MAX_COMMAND_LINE: usize = 32767;

pub const STARTF_USESHOWWINDOW: u32 = 0x0000_0001;
pub const STARTF_USESIZE: u32 = 0x0000_0002;
pub const STARTF_USEPOSITION: u32 = 0x0000_0004;
pub const STARTF_USESTDHANDLES: u32 = 0x0000_0100;

/// Process creation flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreationFlags {
    value: u32,
}

impl CreationFlags {
    /// No flags
    pub const NONE: Self = Self { value: 0 };
    /// Primary thread starts suspended until resumed
    pub const SUSPENDED: Self = Self { value: 0x0000_0004 };
    /// Child gets no console at all
    pub const DETACHED_PROCESS: Self = Self { value: 0x0000_0008 };
    /// Child gets its own new console
    pub const NEW_CONSOLE: Self = Self { value: 0x0000_0010 };
    /// Child is the root of a new process group
    pub const NEW_PROCESS_GROUP: Self = Self { value: 0x0000_0200 };
    /// Environment block is UTF-16
    pub const UNICODE_ENVIRONMENT: Self = Self { value: 0x0000_0400 };
    /// Child is not associated with the job of the parent
    pub const BREAKAWAY_FROM_JOB: Self = Self { value: 0x0100_0000 };
    /// Console application runs without a console window
    pub const NO_WINDOW: Self = Self { value: 0x0800_0000 };

    /// Builds flags from a raw value
    pub const fn from_bits(value: u32) -> Self {
        Self { value }
    }

    /// Combine flags
    pub fn combine(flags: &[Self]) -> Self {
        let mut value = 0;
        for flag in flags {
            value |= flag.value;
        }
        Self { value }
    }

    /// Checks if every bit of `other` is set
    pub const fn contains(&self, other: Self) -> bool {
        self.value & other.value == other.value
    }

    /// Get raw value
    pub const fn value(&self) -> u32 {
        self.value
    }
}

impl BitOr for CreationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            value: self.value | rhs.value,
        }
    }
}

/// Initial window state, `SW_*` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowWindow {
    Hide,
    ShowNormal,
    ShowMinimized,
    ShowMaximized,
    ShowNoActivate,
    Show,
    Minimize,
    ShowMinNoActive,
    ShowNa,
    Restore,
    ShowDefault,
    ForceMinimize,
}

impl ShowWindow {
    /// Raw `wShowWindow` value
    pub const fn code(&self) -> u16 {
        match self {
            ShowWindow::Hide => 0,
            ShowWindow::ShowNormal => 1,
            ShowWindow::ShowMinimized => 2,
            ShowWindow::ShowMaximized => 3,
            ShowWindow::ShowNoActivate => 4,
            ShowWindow::Show => 5,
            ShowWindow::Minimize => 6,
            ShowWindow::ShowMinNoActive => 7,
            ShowWindow::ShowNa => 8,
            ShowWindow::Restore => 9,
            ShowWindow::ShowDefault => 10,
            ShowWindow::ForceMinimize => 11,
        }
    }
}

/// Standard stream redirection for the child.
///
/// Streams left as `None` are filled with the parent's own standard handles
/// when the record is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StdHandles {
    pub input: Option<RawHandleValue>,
    pub output: Option<RawHandleValue>,
    pub error: Option<RawHandleValue>,
}

impl StdHandles {
    fn is_empty(&self) -> bool {
        self.input.is_none() && self.output.is_none() && self.error.is_none()
    }
}

/// Validated, immutable description of a process launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    application: Option<PathBuf>,
    command_line: String,
    inherit_handles: bool,
    creation_flags: CreationFlags,
    show_window: Option<ShowWindow>,
    std_handles: Option<StdHandles>,
    desktop: Option<String>,
    title: Option<String>,
    position: Option<(u32, u32)>,
    size: Option<(u32, u32)>,
    current_directory: Option<PathBuf>,
    environment: Option<Vec<(String, String)>>,
}

impl StartupConfig {
    /// Starts a builder for the given full command line
    pub fn builder(command_line: impl Into<String>) -> StartupConfigBuilder {
        StartupConfigBuilder::new(command_line)
    }

    pub fn application(&self) -> Option<&Path> {
        self.application.as_deref()
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn inherit_handles(&self) -> bool {
        self.inherit_handles
    }

    pub fn creation_flags(&self) -> CreationFlags {
        self.creation_flags
    }

    pub fn show_window(&self) -> Option<ShowWindow> {
        self.show_window
    }

    pub fn std_handles(&self) -> Option<StdHandles> {
        self.std_handles
    }

    pub fn desktop(&self) -> Option<&str> {
        self.desktop.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn position(&self) -> Option<(u32, u32)> {
        self.position
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    pub fn current_directory(&self) -> Option<&Path> {
        self.current_directory.as_deref()
    }

    pub fn environment(&self) -> Option<&[(String, String)]> {
        self.environment.as_deref()
    }

    /// Mutable, NUL-terminated UTF-16 command line; the native call may
    /// write into it
    pub fn command_line_buffer(&self) -> Vec<u16> {
        string_to_wide(&self.command_line)
    }

    /// `STARTF_*` bits implied by the configured fields
    pub fn startup_flags(&self) -> u32 {
        let mut flags = 0;
        if self.show_window.is_some() {
            flags |= STARTF_USESHOWWINDOW;
        }
        if self.size.is_some() {
            flags |= STARTF_USESIZE;
        }
        if self.position.is_some() {
            flags |= STARTF_USEPOSITION;
        }
        if self.std_handles.is_some() {
            flags |= STARTF_USESTDHANDLES;
        }
        flags
    }

    /// Creation flags as passed to the native call
    pub fn effective_creation_flags(&self) -> CreationFlags {
        if self.environment.is_some() {
            self.creation_flags | CreationFlags::UNICODE_ENVIRONMENT
        } else {
            self.creation_flags
        }
    }

    /// UTF-16 environment block: `KEY=value\0` entries sorted
    /// case-insensitively, closed by an extra `\0`. `None` inherits the
    /// parent's environment.
    pub fn environment_block(&self) -> Option<Vec<u16>> {
        let vars = self.environment.as_ref()?;

        let mut sorted: Vec<&(String, String)> = vars.iter().collect();
        sorted.sort_by_key(|(key, _)| fold_key(key));

        let mut block = Vec::new();
        for (key, value) in sorted {
            block.extend(key.encode_utf16());
            block.push(u16::from(b'='));
            block.extend(value.encode_utf16());
            block.push(0);
        }
        if block.is_empty() {
            block.push(0);
        }
        block.push(0);
        Some(block)
    }
}

/// Builder for [`StartupConfig`]
#[derive(Debug, Clone)]
pub struct StartupConfigBuilder {
    config: StartupConfig,
}

impl StartupConfigBuilder {
    /// Creates a builder with the given full command line and no options
    pub fn new(command_line: impl Into<String>) -> Self {
        StartupConfigBuilder {
            config: StartupConfig {
                application: None,
                command_line: command_line.into(),
                inherit_handles: false,
                creation_flags: CreationFlags::NONE,
                show_window: None,
                std_handles: None,
                desktop: None,
                title: None,
                position: None,
                size: None,
                current_directory: None,
                environment: None,
            },
        }
    }

    /// Creates a builder from a program and its arguments, quoted the way the
    /// C runtime splits them back apart
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(join_command_line(args))
    }

    /// Applies the `[launch]` section of the configuration
    pub fn with_defaults(mut self, launch: &LaunchConfig) -> Self {
        self.config.inherit_handles = launch.inherit_handles;
        self.config.show_window = Some(launch.show_window);
        if launch.new_console {
            self.config.creation_flags = self.config.creation_flags | CreationFlags::NEW_CONSOLE;
        }
        if launch.suspended {
            self.config.creation_flags = self.config.creation_flags | CreationFlags::SUSPENDED;
        }
        self
    }

    /// Executable to run; the command line is then passed as-is
    pub fn application(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.application = Some(path.into());
        self
    }

    pub fn inherit_handles(mut self, inherit: bool) -> Self {
        self.config.inherit_handles = inherit;
        self
    }

    /// Replaces the creation flags
    pub fn creation_flags(mut self, flags: CreationFlags) -> Self {
        self.config.creation_flags = flags;
        self
    }

    pub fn show_window(mut self, show: ShowWindow) -> Self {
        self.config.show_window = Some(show);
        self
    }

    /// Redirects standard streams; requires handle inheritance
    pub fn std_handles(mut self, handles: StdHandles) -> Self {
        self.config.std_handles = Some(handles);
        self
    }

    pub fn desktop(mut self, desktop: impl Into<String>) -> Self {
        self.config.desktop = Some(desktop.into());
        self
    }

    /// Console window title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn position(mut self, x: u32, y: u32) -> Self {
        self.config.position = Some((x, y));
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.size = Some((width, height));
        self
    }

    pub fn current_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.current_directory = Some(dir.into());
        self
    }

    /// Adds a variable to an explicit environment block. Once any variable
    /// is set the child no longer inherits the parent's environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let vars = self.config.environment.get_or_insert_with(Vec::new);
        let folded = fold_key(&key);
        vars.retain(|(existing, _)| fold_key(existing) != folded);
        vars.push((key, value.into()));
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in vars {
            self = self.env(key, value);
        }
        self
    }

    /// Starts the child with an empty environment
    pub fn env_clear(mut self) -> Self {
        self.config.environment = Some(Vec::new());
        self
    }

    /// Validates and freezes the configuration
    pub fn build(self) -> ProcessResult<StartupConfig> {
        let config = self.config;

        let length = wide_len(&config.command_line);
        if length + 1 > MAX_COMMAND_LINE {
            return Err(ProcessError::CommandLineTooLong {
                length,
                max: MAX_COMMAND_LINE - 1,
            });
        }

        if config.command_line.trim().is_empty() && config.application.is_none() {
            return Err(ProcessError::invalid_argument(
                "command line is empty and no application was given",
            ));
        }

        if config.command_line.contains('\0') {
            return Err(ProcessError::invalid_argument(
                "command line contains a NUL character",
            ));
        }

        if config.creation_flags.contains(CreationFlags::NEW_CONSOLE)
            && config
                .creation_flags
                .contains(CreationFlags::DETACHED_PROCESS)
        {
            return Err(ProcessError::invalid_argument(
                "NEW_CONSOLE and DETACHED_PROCESS cannot be combined",
            ));
        }

        if let Some(handles) = &config.std_handles {
            if handles.is_empty() {
                return Err(ProcessError::invalid_argument(
                    "std handle redirection without any handle",
                ));
            }
            if !config.inherit_handles {
                return Err(ProcessError::invalid_argument(
                    "redirected std handles require handle inheritance",
                ));
            }
        }

        for text in [&config.desktop, &config.title].into_iter().flatten() {
            if text.contains('\0') {
                return Err(ProcessError::invalid_argument(
                    "desktop and title must not contain NUL",
                ));
            }
        }

        if let Some(vars) = &config.environment {
            for (key, value) in vars {
                validate_env_entry(key, value)?;
            }
        }

        Ok(config)
    }
}

fn validate_env_entry(key: &str, value: &str) -> ProcessResult<()> {
    if key.is_empty() {
        return Err(ProcessError::invalid_argument(
            "environment variable name is empty",
        ));
    }
    // Names like "=C:" are legal; "=" is otherwise the separator
    if key.chars().skip(1).any(|c| c == '=') {
        return Err(ProcessError::invalid_argument(format!(
            "environment variable name '{}' contains '='",
            key
        )));
    }
    if key.contains('\0') || value.contains('\0') {
        return Err(ProcessError::invalid_argument(format!(
            "environment variable '{}' contains NUL",
            key
        )));
    }
    Ok(())
}

/// Joins arguments into one command line that `CommandLineToArgvW` and the
/// C runtime split back into the same arguments
pub fn join_command_line<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        quote_arg(arg.as_ref(), &mut line);
    }
    line
}

fn quote_arg(arg: &str, out: &mut String) {
    let needs_quotes = arg.is_empty() || arg.contains(&[' ', '\t', '\n', '\u{b}', '"'][..]);
    if !needs_quotes {
        out.push_str(arg);
        return;
    }

    out.push('"');
    let mut backslashes = 0;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                // Escape the pending backslashes and the quote itself
                out.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                out.push('"');
                backslashes = 0;
            }
            _ => {
                out.extend(std::iter::repeat('\\').take(backslashes));
                out.push(c);
                backslashes = 0;
            }
        }
    }
    // Backslashes before the closing quote must be doubled
    out.extend(std::iter::repeat('\\').take(backslashes * 2));
    out.push('"');
}

/// Case folding shared by variable replacement and block ordering
fn fold_key(key: &str) -> String {
    key.to_uppercase()
}
