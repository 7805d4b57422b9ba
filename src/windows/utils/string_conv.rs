//! String conversion utilities for Windows API

use std::path::Path;

/// Convert a Rust string to a NUL-terminated wide string (UTF-16)
pub fn string_to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convert a path to a NUL-terminated wide string
#[cfg(windows)]
pub fn path_to_wide(path: &Path) -> Vec<u16> {
    use std::os::windows::ffi::OsStrExt;

    path.as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

/// Convert a path to a NUL-terminated wide string
#[cfg(not(windows))]
pub fn path_to_wide(path: &Path) -> Vec<u16> {
    string_to_wide(&path.to_string_lossy())
}

/// Convert a wide string (UTF-16) to a Rust string, stopping at the first NUL
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Number of UTF-16 units a string occupies, without terminator
pub fn wide_len(s: &str) -> usize {
    s.encode_utf16().count()
}
