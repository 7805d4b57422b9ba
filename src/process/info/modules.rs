//! Module enumeration
//!
//! Lists the file paths of every module loaded in a target process. The
//! module list is read with a query-and-grow loop since its size is only
//! known after the first native call, and may change between calls.

use crate::config::ModulesConfig;
use crate::core::types::{ProcessError, ProcessResult};
use std::mem;

#[cfg(windows)]
use crate::windows::bindings::psapi;
#[cfg(windows)]
use crate::windows::types::AsHandleValue;
#[cfg(windows)]
use tracing::{debug, instrument, trace};

/// Runs a fill-style query until the buffer holds the whole result.
///
/// `query` fills the slice it is given and returns how many bytes the full
/// result needs. The buffer starts at `initial` elements and is resized to
/// the reported size after every short round, up to `max_rounds` resizes.
/// The returned vector holds exactly the reported number of elements.
pub fn query_growable<T, F>(
    initial: usize,
    max_rounds: usize,
    mut query: F,
) -> ProcessResult<Vec<T>>
where
    T: Copy + Default,
    F: FnMut(&mut [T]) -> ProcessResult<usize>,
{
    let element = mem::size_of::<T>().max(1);
    let mut buffer = vec![T::default(); initial.max(1)];
    let mut rounds = 0;

    loop {
        let needed_bytes = query(&mut buffer)?;
        let needed = needed_bytes.div_ceil(element);

        if needed <= buffer.len() {
            buffer.truncate(needed);
            return Ok(buffer);
        }

        if rounds >= max_rounds {
            return Err(ProcessError::ModuleListUnstable { rounds });
        }
        rounds += 1;
        buffer = vec![T::default(); needed];
    }
}

/// Enumerates modules loaded in a process
#[derive(Debug, Clone, Default)]
pub struct ModuleEnumerator {
    config: ModulesConfig,
}

impl ModuleEnumerator {
    /// Create a new module enumerator with explicit buffer settings
    pub fn new(config: ModulesConfig) -> Self {
        ModuleEnumerator { config }
    }

    pub fn config(&self) -> &ModulesConfig {
        &self.config
    }

    /// Raw module handles of the process, main executable first
    #[cfg(windows)]
    pub fn module_handles<H>(&self, process: &H) -> ProcessResult<Vec<usize>>
    where
        H: AsHandleValue + ?Sized,
    {
        if process.is_invalid_handle() {
            return Err(ProcessError::invalid_handle(
                "cannot enumerate modules through an invalid handle",
            ));
        }
        let raw = process.as_handle_value();

        query_growable(
            self.config.initial_capacity,
            self.config.max_growth_rounds,
            |buffer: &mut [usize]| {
                let needed = unsafe { psapi::enum_process_modules(raw, buffer)? };
                trace!(capacity = buffer.len(), needed, "module list query");
                Ok(needed)
            },
        )
    }

    /// Full paths of every module loaded in the process.
    ///
    /// Each path is read through a buffer of `name_capacity` UTF-16 units,
    /// so longer paths come back truncated.
    #[cfg(windows)]
    #[instrument(level = "debug", skip(self, process))]
    pub fn module_names<H>(&self, process: &H) -> ProcessResult<Vec<String>>
    where
        H: AsHandleValue + ?Sized,
    {
        let raw = process.as_handle_value();
        let handles = self.module_handles(process)?;

        let mut names = Vec::with_capacity(handles.len());
        for module in handles {
            let name =
                unsafe { psapi::get_module_file_name(raw, module, self.config.name_capacity)? };
            names.push(name);
        }

        debug!(count = names.len(), "Enumerated modules");
        Ok(names)
    }
}

/// Module paths of a process using the default buffer settings
#[cfg(windows)]
pub fn module_names<H>(process: &H) -> ProcessResult<Vec<String>>
where
    H: AsHandleValue + ?Sized,
{
    ModuleEnumerator::default().module_names(process)
}

/// Find a module path by file name (case-insensitive)
pub fn find_module_by_name<'a>(names: &'a [String], file_name: &str) -> Option<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .find(|path| base_name(path).eq_ignore_ascii_case(file_name))
}

/// Final path component of a module path
pub fn base_name(path: &str) -> &str {
    path.rsplit(&['\\', '/'][..]).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WORD: usize = mem::size_of::<usize>();

    /// Fake module list of `total` entries, counting the calls made
    fn fake_list(
        total: usize,
        calls: &mut u32,
    ) -> impl FnMut(&mut [usize]) -> ProcessResult<usize> + '_ {
        move |buffer| {
            *calls += 1;
            for (i, slot) in buffer.iter_mut().take(total).enumerate() {
                *slot = 0x1000 * (i + 1);
            }
            Ok(total * WORD)
        }
    }

    #[test]
    fn test_fits_first_round() {
        let mut calls = 0;
        let list: Vec<usize> = query_growable(8, 4, fake_list(3, &mut calls)).unwrap();
        assert_eq!(list, vec![0x1000, 0x2000, 0x3000]);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_exact_fit() {
        let mut calls = 0;
        let list: Vec<usize> = query_growable(4, 4, fake_list(4, &mut calls)).unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_grows_to_reported_size() {
        let mut calls = 0;
        let list: Vec<usize> = query_growable(1, 4, fake_list(40, &mut calls)).unwrap();
        assert_eq!(list.len(), 40);
        assert_eq!(list[39], 0x1000 * 40);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_empty_result() {
        let list: Vec<usize> = query_growable(16, 4, |_: &mut [usize]| Ok(0)).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_unstable_growth_is_bounded() {
        let mut calls = 0u32;
        let result: ProcessResult<Vec<usize>> = query_growable(1, 3, |buffer: &mut [usize]| {
            calls += 1;
            // Always one more than fits
            Ok((buffer.len() + 1) * WORD)
        });
        assert!(matches!(
            result,
            Err(ProcessError::ModuleListUnstable { rounds: 3 })
        ));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_query_error_propagates() {
        let result: ProcessResult<Vec<usize>> =
            query_growable(4, 4, |_: &mut [usize]| Err(ProcessError::platform(5, "EnumProcessModulesEx")));
        assert_eq!(result.unwrap_err().os_code(), Some(5));
    }

    #[test]
    fn test_find_module_by_name() {
        let names = vec![
            "C:\\app\\app.exe".to_string(),
            "C:\\Windows\\SYSTEM32\\ntdll.dll".to_string(),
        ];
        assert_eq!(
            find_module_by_name(&names, "NTDLL.DLL"),
            Some("C:\\Windows\\SYSTEM32\\ntdll.dll")
        );
        assert_eq!(find_module_by_name(&names, "kernel32.dll"), None);
        assert_eq!(base_name("plain.dll"), "plain.dll");
    }

    #[test]
    fn test_enumerator_uses_config() {
        let enumerator = ModuleEnumerator::new(ModulesConfig {
            initial_capacity: 2,
            name_capacity: 64,
            max_growth_rounds: 1,
        });
        assert_eq!(enumerator.config().name_capacity, 64);
        assert_eq!(ModuleEnumerator::default().config().initial_capacity, 1024);
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_invalid_handle_rejected() {
        let result = module_names(&0isize);
        assert!(matches!(result, Err(ProcessError::InvalidHandle(_))));
    }
}
