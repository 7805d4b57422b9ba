//! Integration tests for startup configuration building

use pretty_assertions::assert_eq;
use winproc::process::startup::{
    STARTF_USEPOSITION, STARTF_USESHOWWINDOW, STARTF_USESIZE, STARTF_USESTDHANDLES,
};
use winproc::process::{join_command_line, MAX_COMMAND_LINE};
use winproc::{CreationFlags, ProcessError, ShowWindow, StartupConfigBuilder, StdHandles};

#[test]
fn test_command_line_at_limit() {
    let longest = "a".repeat(MAX_COMMAND_LINE - 1);
    assert!(StartupConfigBuilder::new(longest).build().is_ok());

    let too_long = "a".repeat(MAX_COMMAND_LINE);
    let err = StartupConfigBuilder::new(too_long).build().unwrap_err();
    assert!(matches!(
        err,
        ProcessError::CommandLineTooLong {
            length: 32767,
            max: 32766
        }
    ));
}

#[test]
fn test_command_line_limit_counts_utf16_units() {
    // Each of these is two UTF-16 units
    let emoji = "\u{1F600}".repeat(MAX_COMMAND_LINE / 2 + 1);
    assert!(matches!(
        StartupConfigBuilder::new(emoji).build(),
        Err(ProcessError::CommandLineTooLong { .. })
    ));
}

#[test]
fn test_empty_command_line_needs_application() {
    assert!(matches!(
        StartupConfigBuilder::new("   ").build(),
        Err(ProcessError::InvalidArgument(_))
    ));

    let config = StartupConfigBuilder::new("")
        .application("C:\\Windows\\System32\\cmd.exe")
        .build()
        .unwrap();
    assert!(config.application().is_some());
}

#[test]
fn test_startup_flags_follow_fields() {
    let config = StartupConfigBuilder::new("app.exe")
        .show_window(ShowWindow::ShowMaximized)
        .position(10, 20)
        .size(640, 480)
        .inherit_handles(true)
        .std_handles(StdHandles {
            output: Some(0x40),
            ..StdHandles::default()
        })
        .build()
        .unwrap();

    assert_eq!(
        config.startup_flags(),
        STARTF_USESHOWWINDOW | STARTF_USEPOSITION | STARTF_USESIZE | STARTF_USESTDHANDLES
    );
    assert_eq!(config.position(), Some((10, 20)));
    assert_eq!(config.size(), Some((640, 480)));
}

#[test]
fn test_std_handles_require_inheritance() {
    let result = StartupConfigBuilder::new("app.exe")
        .std_handles(StdHandles {
            input: Some(0x10),
            ..StdHandles::default()
        })
        .build();
    assert!(result.unwrap_err().to_string().contains("inheritance"));
}

#[test]
fn test_conflicting_console_flags() {
    let result = StartupConfigBuilder::new("app.exe")
        .creation_flags(CreationFlags::NEW_CONSOLE | CreationFlags::DETACHED_PROCESS)
        .build();
    assert!(matches!(result, Err(ProcessError::InvalidArgument(_))));
}

#[test]
fn test_environment_block_layout() {
    let config = StartupConfigBuilder::new("app.exe")
        .env("beta", "2")
        .env("Alpha", "1")
        .env("BETA", "3")
        .build()
        .unwrap();

    let block = config.environment_block().unwrap();
    let text = String::from_utf16(&block).unwrap();
    assert_eq!(text, "Alpha=1\0BETA=3\0\0");
    assert!(config
        .effective_creation_flags()
        .contains(CreationFlags::UNICODE_ENVIRONMENT));
}

#[test]
fn test_block_sorts_and_replaces_with_same_folding() {
    let config = StartupConfigBuilder::new("app.exe")
        .env("öl", "1")
        .env("ÖL", "2")
        .env("Zeta", "3")
        .env("Ärger", "4")
        .build()
        .unwrap();

    assert_eq!(config.environment().unwrap().len(), 3);
    let text = String::from_utf16(&config.environment_block().unwrap()).unwrap();
    assert_eq!(text, "Zeta=3\0Ärger=4\0ÖL=2\0\0");
}

#[test]
fn test_cleared_environment_block() {
    let config = StartupConfigBuilder::new("app.exe")
        .env_clear()
        .build()
        .unwrap();
    assert_eq!(config.environment_block(), Some(vec![0, 0]));
}

#[test]
fn test_invalid_environment_names() {
    for key in ["", "A=B"] {
        let result = StartupConfigBuilder::new("app.exe").env(key, "x").build();
        assert!(result.is_err(), "{:?} should be rejected", key);
    }
    // Drive-letter variables keep their leading '='
    assert!(StartupConfigBuilder::new("app.exe")
        .env("=C:", "C:\\")
        .build()
        .is_ok());
}

#[test]
fn test_join_command_line_quoting() {
    assert_eq!(join_command_line(["a.exe", "plain"]), "a.exe plain");
    assert_eq!(join_command_line(["a.exe", "two words"]), "a.exe \"two words\"");
    assert_eq!(join_command_line(["a.exe", ""]), "a.exe \"\"");
    assert_eq!(
        join_command_line(["a.exe", "say \"hi\""]),
        "a.exe \"say \\\"hi\\\"\""
    );
    assert_eq!(
        join_command_line(["a.exe", "C:\\dir with space\\"]),
        "a.exe \"C:\\dir with space\\\\\""
    );
    // Backslashes not followed by a quote stay as they are
    assert_eq!(join_command_line(["C:\\bin\\a.exe"]), "C:\\bin\\a.exe");
}
