//! Process lifecycle: startup configuration, creation, exit codes,
//! opened handles and introspection.

#[cfg(windows)]
pub mod create;
pub mod exit;
pub mod handle;
pub mod info;
pub mod startup;

#[cfg(windows)]
pub use create::{create, ProcessHandlePair};
pub use exit::{ExitStatus, STILL_ACTIVE};
pub use handle::{ProcessAccess, ProcessHandle};
#[cfg(windows)]
pub use info::{is_wow64, module_names};
pub use info::{find_module_by_name, ModuleEnumerator};
pub use startup::{
    join_command_line, CreationFlags, ShowWindow, StartupConfig, StartupConfigBuilder,
    StdHandles, MAX_COMMAND_LINE,
};
