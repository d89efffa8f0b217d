//! Processor model.
//!
//! This module contains the CPU state and the units that operate on it: the
//! architectural register components, the `Cpu` itself with its execution
//! entry point, and the stateless ALU.

/// Architectural state components (GPRs, exception levels, flags).
pub mod arch;

/// CPU register file and instruction execution entry point.
pub mod cpu;

/// Execution units (integer ALU).
pub mod units;

pub use self::cpu::{Cpu, Reg31};
