//! Error definitions.
//!
//! This module defines every failure the emulator can report. It provides:
//! 1. **Decode-time outcomes:** `ExecError` with its three architectural kinds
//!    (unallocated, undefined, unimplemented) and `UndefinedReason`.
//! 2. **Memory faults:** `MemoryError` for unmapped, overlapping and misaligned accesses.
//! 3. **Loading and configuration:** `LoadError` and `ConfigError`.
//! 4. **Fetch-loop faults:** `SimError`, wrapping the above for the driver.
//!
//! None of these are fatal inside the core; deciding to stop the emulated
//! process belongs to whoever drives the fetch loop.

use thiserror::Error;

use crate::isa::encoding::{Family, InstructionClass};

/// Result of executing one instruction.
pub type ExecResult = Result<(), ExecError>;

/// Decode-time failure of a single instruction word.
///
/// Every variant is raised before any register is written, so an `Err`
/// leaves the CPU state exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ExecError {
    /// The bit pattern has no instruction in the current architectural view.
    #[error("unallocated encoding {raw:#010x} in {class}")]
    Unallocated {
        /// The instruction word.
        raw: u32,
        /// Top-level class the word was routed to.
        class: InstructionClass,
    },

    /// A valid-looking encoding whose operand combination is architecturally
    /// UNDEFINED.
    #[error("undefined encoding {raw:#010x}: {reason}")]
    Undefined {
        /// The instruction word.
        raw: u32,
        /// Which architectural rule was violated.
        reason: UndefinedReason,
    },

    /// An allocated encoding whose semantics are not modelled yet.
    #[error("unimplemented {family} instruction {raw:#010x}")]
    Unimplemented {
        /// The instruction word.
        raw: u32,
        /// The family the word decodes into.
        family: Family,
    },
}

impl ExecError {
    /// Returns the raw instruction word that failed to execute.
    pub const fn raw(&self) -> u32 {
        match *self {
            Self::Unallocated { raw, .. }
            | Self::Undefined { raw, .. }
            | Self::Unimplemented { raw, .. } => raw,
        }
    }
}

/// Architectural reason an encoding is UNDEFINED.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum UndefinedReason {
    /// Logical immediate with `N = 1` on a 32-bit (`sf = 0`) instruction.
    #[error("64-bit element requested by a 32-bit logical immediate (sf=0, N=1)")]
    WideElementIn32BitForm,
    /// `immN:NOT(imms)` has no set bit above bit 0, so no element size exists.
    #[error("reserved bitmask element size")]
    ReservedElementSize,
    /// `imms` selects every bit of the element; an all-ones pattern is not encodable.
    #[error("bitmask element of all ones")]
    AllOnesElement,
    /// 32-bit bitfield move whose `immr` or `imms` names a bit above 31.
    #[error("bit position above 31 in a 32-bit bitfield move")]
    BitPositionOutOfRange,
}

/// Memory access fault raised by a [`MemoryAccess`](crate::soc::MemoryAccess) implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Some byte of the access lies outside every mapped region.
    #[error("unmapped access of {len} bytes at {addr:#x}")]
    Unmapped {
        /// Start address of the access.
        addr: u64,
        /// Length of the access in bytes.
        len: u64,
    },

    /// An access that requires natural alignment was not aligned.
    #[error("misaligned access at {addr:#x} (required alignment {align})")]
    Misaligned {
        /// Faulting address.
        addr: u64,
        /// Required alignment in bytes.
        align: u64,
    },

    /// Mapping a region that overlaps an existing one.
    #[error("region {base:#x}+{size:#x} overlaps an existing mapping")]
    Overlap {
        /// Base of the rejected region.
        base: u64,
        /// Size of the rejected region.
        size: u64,
    },
}

/// Failure while turning an ELF file into an initial process image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed 64-bit ELF image.
    #[error("malformed ELF: {0}")]
    Parse(#[from] object::Error),

    /// The ELF targets a machine other than AArch64.
    #[error("unsupported ELF machine {machine} (expected AArch64)")]
    WrongMachine {
        /// The `e_machine` value found.
        machine: u16,
    },

    /// Only little-endian images are supported.
    #[error("big-endian ELF images are not supported")]
    BigEndian,

    /// The image requests a program interpreter.
    #[error("cannot load dynamically linked program (interpreter '{interp}')")]
    DynamicallyLinked {
        /// Interpreter path from `PT_INTERP`.
        interp: String,
    },

    /// No `PT_LOAD` segment was found.
    #[error("ELF has no loadable segments")]
    NoLoadableSegments,

    /// A segment's file data lies outside the file, or `p_filesz > p_memsz`.
    #[error("segment at {addr:#x} has invalid file data")]
    BadSegment {
        /// Load address of the segment.
        addr: u64,
    },

    /// The entry point is not inside any loadable segment.
    #[error("entry point {entry:#x} is outside every loadable segment")]
    EntryOutsideImage {
        /// The `e_entry` value.
        entry: u64,
    },

    /// A region is larger than `memory.max_region_size` allows.
    #[error("region at {base:#x} needs {size:#x} bytes (limit {limit:#x})")]
    RegionTooLarge {
        /// Guest base of the region.
        base: u64,
        /// Requested size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The host could not provide backing memory for a region.
    #[error("cannot allocate {size:#x} bytes for region at {base:#x}")]
    OutOfMemory {
        /// Guest base of the region.
        base: u64,
        /// Requested size in bytes.
        size: u64,
    },

    /// The stack configuration is inconsistent or collides with the image.
    #[error("invalid stack layout: {0}")]
    Stack(String),

    /// Placing a region in the address space failed.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Failure while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The contents are not valid configuration JSON.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fault observed by the fetch loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// Fetching the instruction word failed.
    #[error("instruction fetch at {pc:#x}: {source}")]
    Fetch {
        /// Program counter of the failed fetch.
        pc: u64,
        /// Underlying memory fault.
        #[source]
        source: MemoryError,
    },

    /// The fetched word could not be executed.
    #[error("at pc {pc:#x}: {source}")]
    Exec {
        /// Program counter of the instruction.
        pc: u64,
        /// Decode-time outcome.
        #[source]
        source: ExecError,
    },
}
