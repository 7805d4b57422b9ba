//! Integration tests for process creation and exit handling
#![cfg(windows)]

use std::sync::Arc;
use winproc::config::LaunchConfig;
use winproc::process::STILL_ACTIVE;
use winproc::{
    create, wait_one, CreationFlags, ExitStatus, ProcessError, ShowWindow, StartupConfigBuilder,
    Timeout,
};

const LONG_WAIT: Timeout = Timeout::from_millis(30_000);

fn cmd(args: &[&str]) -> StartupConfigBuilder {
    let mut all = vec!["cmd.exe"];
    all.extend_from_slice(args);
    StartupConfigBuilder::from_args(all)
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_exit_code_round_trip() {
    let config = cmd(&["/c", "exit", "12345"])
        .creation_flags(CreationFlags::NEW_CONSOLE)
        .show_window(ShowWindow::Hide)
        .build()
        .unwrap();

    let child = create(&config).expect("spawn cmd.exe");
    assert!(child.pid() > 0);
    assert_ne!(child.pid(), std::process::id());

    let code = child.wait_for_exit(LONG_WAIT).expect("wait for exit");
    assert_eq!(code, 12345);
    assert!(child.close());
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_suspended_process_runs_after_resume() {
    let config = cmd(&["/c", "exit", "3"])
        .creation_flags(CreationFlags::SUSPENDED | CreationFlags::NO_WINDOW)
        .build()
        .unwrap();

    let child = create(&config).expect("spawn suspended");
    assert_eq!(child.exit_status().unwrap(), ExitStatus::StillActive);
    assert!(matches!(
        wait_one(child.process(), Timeout::from_millis(100)),
        Err(ProcessError::Timeout(_))
    ));

    assert_eq!(child.resume().unwrap(), 1);
    assert_eq!(child.wait_for_exit(LONG_WAIT).unwrap(), 3);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_terminate_sets_exit_code() {
    let config = cmd(&["/c", "exit", "0"])
        .creation_flags(CreationFlags::SUSPENDED | CreationFlags::NO_WINDOW)
        .build()
        .unwrap();

    let child = create(&config).unwrap();
    child.terminate(77).expect("terminate");
    assert_eq!(child.wait_for_exit(LONG_WAIT).unwrap(), 77);
    assert_eq!(child.exit_status().unwrap(), ExitStatus::Exited(77));
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_exit_code_259_reads_as_still_active() {
    let config = cmd(&["/c", "exit", "259"])
        .creation_flags(CreationFlags::NO_WINDOW)
        .build()
        .unwrap();

    let child = create(&config).unwrap();
    // After a completed wait the raw code is authoritative
    assert_eq!(child.wait_for_exit(LONG_WAIT).unwrap(), STILL_ACTIVE);
    assert_eq!(child.exit_status().unwrap(), ExitStatus::StillActive);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_environment_and_directory_reach_child() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = StartupConfigBuilder::new("cmd.exe /c if %WINPROC_MARK%==on (exit 5) else (exit 6)")
        .creation_flags(CreationFlags::NO_WINDOW)
        .env("SystemRoot", std::env::var("SystemRoot").unwrap_or_default())
        .env("WINPROC_MARK", "on")
        .current_directory(dir.path())
        .build()
        .unwrap();

    let child = create(&config).unwrap();
    assert_eq!(child.wait_for_exit(LONG_WAIT).unwrap(), 5);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_launch_defaults_applied() {
    let launch = LaunchConfig {
        suspended: true,
        show_window: ShowWindow::Hide,
        ..LaunchConfig::default()
    };
    let config = cmd(&["/c", "exit", "1"])
        .with_defaults(&launch)
        .build()
        .unwrap();

    let child = create(&config).unwrap();
    assert_eq!(child.exit_status().unwrap(), ExitStatus::StillActive);
    child.terminate(1).unwrap();
    assert_eq!(child.wait_for_exit(LONG_WAIT).unwrap(), 1);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_missing_program_reports_os_error() {
    let config = StartupConfigBuilder::new("winproc-missing-program-0000.exe")
        .build()
        .unwrap();
    let err = create(&config).unwrap_err();
    assert_eq!(err.os_code(), Some(2));
}

#[tokio::test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
async fn test_async_wait_for_exit() {
    let config = cmd(&["/c", "exit", "42"])
        .creation_flags(CreationFlags::NO_WINDOW)
        .build()
        .unwrap();

    let child = Arc::new(create(&config).unwrap());
    let code = Arc::clone(&child)
        .wait_for_exit_async(LONG_WAIT)
        .await
        .unwrap();
    assert_eq!(code, 42);
    // The blocking task dropped its clone when it finished
    assert_eq!(Arc::strong_count(&child), 1);
}
