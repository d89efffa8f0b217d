//! Fetch-Execute Loop.
//!
//! The `Emulator` owns one CPU and its address space and drives them:
//! 1. **Fetch:** Read the 4-byte-aligned little-endian word at `pc`.
//! 2. **Execute:** Hand the word to the decode tree, emitting a trace event
//!    first when instruction tracing is enabled.
//! 3. **Advance:** Move `pc` to the next instruction.
//!
//! A fetch fault or decode outcome other than success stops the loop with
//! `pc` still pointing at the offending instruction.

use tracing::{info, trace, warn};

use crate::common::constants::{INSTRUCTION_ALIGN, INSTRUCTION_SIZE};
use crate::common::{MemoryError, SimError};
use crate::config::Config;
use crate::core::Cpu;
use crate::isa::decode;
use crate::sim::loader::LoadedImage;
use crate::soc::memory::AddressSpace;
use crate::soc::traits::MemoryAccess;

/// Why [`Emulator::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// An instruction could not be fetched or executed.
    Fault(SimError),
    /// The configured instruction limit was reached.
    StepLimit,
}

/// Outcome of [`Emulator::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Instructions that completed successfully.
    pub executed: u64,
    /// Why execution stopped.
    pub stop: StopReason,
}

/// A single-core user-mode AArch64 emulator.
#[derive(Debug)]
pub struct Emulator {
    /// The CPU state.
    pub cpu: Cpu,
    /// The process address space.
    pub memory: AddressSpace,
    max_instructions: Option<u64>,
    trace_instructions: bool,
    executed: u64,
}

impl Emulator {
    /// Creates an emulator positioned at the image's entry point.
    ///
    /// # Arguments
    ///
    /// * `image` - Output of the loader.
    /// * `config` - Run settings (tracing, instruction limit).
    pub fn new(image: LoadedImage, config: &Config) -> Self {
        Self {
            cpu: Cpu::with_entry(image.entry, image.initial_sp),
            memory: image.memory,
            max_instructions: config.general.max_instructions,
            trace_instructions: config.general.trace_instructions,
            executed: 0,
        }
    }

    /// Number of instructions executed so far.
    pub const fn executed(&self) -> u64 {
        self.executed
    }

    /// Whether every executed instruction emits a trace event.
    pub const fn traces_instructions(&self) -> bool {
        self.trace_instructions
    }

    /// Fetches and executes one instruction.
    pub fn step(&mut self) -> Result<(), SimError> {
        let pc = self.cpu.pc;
        if pc % INSTRUCTION_ALIGN != 0 {
            return Err(SimError::Fetch {
                pc,
                source: MemoryError::Misaligned {
                    addr: pc,
                    align: INSTRUCTION_ALIGN,
                },
            });
        }
        let inst = self
            .memory
            .read_u32(pc)
            .map_err(|source| SimError::Fetch { pc, source })?;
        if self.trace_instructions {
            trace!("{pc:#018x}: {inst:#010x} ({})", decode::classify(inst));
        }
        self.cpu
            .execute(inst)
            .map_err(|source| SimError::Exec { pc, source })?;
        self.cpu.pc = pc.wrapping_add(INSTRUCTION_SIZE);
        self.executed += 1;
        Ok(())
    }

    /// Runs until a fault or the instruction limit.
    pub fn run(&mut self) -> RunSummary {
        info!(limit = ?self.max_instructions, "starting execution at {:#x}", self.cpu.pc);
        let stop = loop {
            if self.max_instructions.is_some_and(|max| self.executed >= max) {
                break StopReason::StepLimit;
            }
            if let Err(err) = self.step() {
                warn!(executed = self.executed, "stopped: {err}");
                break StopReason::Fault(err);
            }
        };
        RunSummary {
            executed: self.executed,
            stop,
        }
    }
}
