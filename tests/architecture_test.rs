//! Integration tests for WOW64 classification

use pretty_assertions::assert_eq;
use winproc::core::types::classify_machines;
use winproc::{ArchitectureReport, MachineType, ProcessArchitecture, Wow64Status};

#[test]
fn test_native_process_on_x64() {
    let report = ArchitectureReport::from_codes(0, 0x8664);
    assert_eq!(report.status, Wow64Status::NotWow64);
    assert_eq!(report.is_wow64(), Some(false));
    assert_eq!(report.architecture(), ProcessArchitecture::X64);
}

#[test]
fn test_x86_process_on_x64_is_wow64() {
    let report = ArchitectureReport::from_codes(0x014C, 0x8664);
    assert_eq!(report.status, Wow64Status::Wow64);
    assert_eq!(report.is_wow64(), Some(true));
    assert_eq!(report.architecture(), ProcessArchitecture::X86);
}

#[test]
fn test_arm32_process_on_arm64_is_wow64() {
    let status = classify_machines(MachineType::ArmNt, MachineType::Arm64);
    assert_eq!(status, Wow64Status::Wow64);
}

#[test]
fn test_unrecognized_codes_are_unknown() {
    let report = ArchitectureReport::from_codes(0x1234, 0x8664);
    assert_eq!(report.status, Wow64Status::Unknown);
    assert_eq!(report.is_wow64(), None);
    assert_eq!(report.process_machine, MachineType::Other(0x1234));

    let report = ArchitectureReport::from_codes(0, 0xBEEF);
    assert_eq!(report.status, Wow64Status::Unknown);
}

#[test]
fn test_report_serializes_for_tooling() {
    let report = ArchitectureReport::from_codes(0x014C, 0x8664);
    let json = serde_json::to_value(report).unwrap();
    assert_eq!(json["status"], serde_json::json!("wow64"));

    let back: ArchitectureReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}

#[cfg(windows)]
#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_current_process_architecture() {
    let handle = winproc::ProcessHandle::current().unwrap();
    let report = winproc::is_wow64(&handle).unwrap();

    assert_eq!(report.status, Wow64Status::NotWow64);
    let expected_bits = std::mem::size_of::<usize>();
    assert_eq!(report.architecture().pointer_size(), Some(expected_bits));
}
