//! Machine type codes and WOW64 classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// PE machine type as reported by the OS for a process or the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineType {
    /// `IMAGE_FILE_MACHINE_UNKNOWN`; for a process it means "not emulated"
    Unknown,
    I386,
    Amd64,
    ArmNt,
    Arm64,
    /// Any code this crate does not recognize
    Other(u16),
}

impl MachineType {
    pub const CODE_UNKNOWN: u16 = 0x0000;
    pub const CODE_I386: u16 = 0x014C;
    pub const CODE_ARMNT: u16 = 0x01C4;
    pub const CODE_AMD64: u16 = 0x8664;
    pub const CODE_ARM64: u16 = 0xAA64;

    /// Decodes a raw machine code
    pub const fn from_code(code: u16) -> Self {
        match code {
            Self::CODE_UNKNOWN => MachineType::Unknown,
            Self::CODE_I386 => MachineType::I386,
            Self::CODE_ARMNT => MachineType::ArmNt,
            Self::CODE_AMD64 => MachineType::Amd64,
            Self::CODE_ARM64 => MachineType::Arm64,
            other => MachineType::Other(other),
        }
    }

    /// Returns the raw machine code
    pub const fn code(&self) -> u16 {
        match self {
            MachineType::Unknown => Self::CODE_UNKNOWN,
            MachineType::I386 => Self::CODE_I386,
            MachineType::ArmNt => Self::CODE_ARMNT,
            MachineType::Amd64 => Self::CODE_AMD64,
            MachineType::Arm64 => Self::CODE_ARM64,
            MachineType::Other(code) => *code,
        }
    }

    /// Pointer width in bits, `None` when the code is not recognized
    pub const fn bitness(&self) -> Option<u32> {
        match self {
            MachineType::I386 | MachineType::ArmNt => Some(32),
            MachineType::Amd64 | MachineType::Arm64 => Some(64),
            MachineType::Unknown | MachineType::Other(_) => None,
        }
    }

    /// Maps to the coarse architecture enum
    pub const fn architecture(&self) -> ProcessArchitecture {
        match self {
            MachineType::I386 => ProcessArchitecture::X86,
            MachineType::Amd64 => ProcessArchitecture::X64,
            MachineType::ArmNt => ProcessArchitecture::Arm,
            MachineType::Arm64 => ProcessArchitecture::Arm64,
            MachineType::Unknown | MachineType::Other(_) => ProcessArchitecture::Unknown,
        }
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineType::Unknown => write!(f, "unknown"),
            MachineType::I386 => write!(f, "i386"),
            MachineType::Amd64 => write!(f, "amd64"),
            MachineType::ArmNt => write!(f, "armnt"),
            MachineType::Arm64 => write!(f, "arm64"),
            MachineType::Other(code) => write!(f, "0x{:04X}", code),
        }
    }
}

/// Process architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessArchitecture {
    X86,
    X64,
    Arm,
    Arm64,
    Unknown,
}

impl ProcessArchitecture {
    /// Returns the pointer size for this architecture
    pub fn pointer_size(&self) -> Option<usize> {
        match self {
            ProcessArchitecture::X86 | ProcessArchitecture::Arm => Some(4),
            ProcessArchitecture::X64 | ProcessArchitecture::Arm64 => Some(8),
            ProcessArchitecture::Unknown => None,
        }
    }

    /// Checks if this is a 64-bit architecture
    pub fn is_64bit(&self) -> bool {
        matches!(self, ProcessArchitecture::X64 | ProcessArchitecture::Arm64)
    }
}

impl fmt::Display for ProcessArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessArchitecture::X86 => write!(f, "x86"),
            ProcessArchitecture::X64 => write!(f, "x64"),
            ProcessArchitecture::Arm => write!(f, "arm"),
            ProcessArchitecture::Arm64 => write!(f, "arm64"),
            ProcessArchitecture::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of comparing a process's machine type against the host's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wow64Status {
    /// Runs natively on the host
    NotWow64,
    /// 32-bit process emulated on a 64-bit host
    Wow64,
    /// One of the codes was not recognized
    Unknown,
}

/// Machine types of a process and its host, with the derived WOW64 status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureReport {
    pub process_machine: MachineType,
    pub native_machine: MachineType,
    pub status: Wow64Status,
}

impl ArchitectureReport {
    /// Builds a report from the raw codes returned by the OS
    pub fn from_codes(process_code: u16, native_code: u16) -> Self {
        let process_machine = MachineType::from_code(process_code);
        let native_machine = MachineType::from_code(native_code);
        ArchitectureReport {
            process_machine,
            native_machine,
            status: classify_machines(process_machine, native_machine),
        }
    }

    /// Whether the process runs under WOW64; `None` if that cannot be told
    pub fn is_wow64(&self) -> Option<bool> {
        match self.status {
            Wow64Status::Wow64 => Some(true),
            Wow64Status::NotWow64 => Some(false),
            Wow64Status::Unknown => None,
        }
    }

    /// Architecture the process code actually executes as
    pub fn architecture(&self) -> ProcessArchitecture {
        match self.status {
            Wow64Status::Wow64 => self.process_machine.architecture(),
            Wow64Status::NotWow64 => self.native_machine.architecture(),
            Wow64Status::Unknown => ProcessArchitecture::Unknown,
        }
    }
}

/// Classifies a process/native machine pair.
///
/// The OS reports `Unknown` as the process machine when the process is not
/// emulated. A recognized 32-bit process machine on a recognized 64-bit host
/// is WOW64. Every other combination, including unrecognized codes on either
/// side, is `Unknown` rather than a guess.
pub fn classify_machines(process: MachineType, native: MachineType) -> Wow64Status {
    let Some(native_bits) = native.bitness() else {
        return Wow64Status::Unknown;
    };

    match (process, process.bitness()) {
        (MachineType::Unknown, _) => Wow64Status::NotWow64,
        (_, Some(32)) if native_bits == 64 => Wow64Status::Wow64,
        _ => Wow64Status::Unknown,
    }
}
