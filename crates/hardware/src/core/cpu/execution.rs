//! Instruction Execution Entry Point.
//!
//! `Cpu::execute` runs exactly one already-fetched instruction word by handing
//! it to the decode tree, which mutates registers and flags.
//!
//! It never fetches, never advances `pc`, and performs no I/O; those belong to
//! the fetch loop, which also owns per-instruction tracing.

use super::Cpu;
use crate::common::ExecResult;
use crate::isa::decode;

impl Cpu {
    /// Decodes and executes `inst` against this CPU.
    ///
    /// On `Err` no register or flag has been modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use a64emu_core::Cpu;
    ///
    /// let mut cpu = Cpu::new();
    /// cpu.set_x(0, 5);
    /// // add x1, x0, #0x7ff
    /// cpu.execute(0x911f_fc01).unwrap();
    /// assert_eq!(cpu.x(1), 5 + 0x7ff);
    /// ```
    pub fn execute(&mut self, inst: u32) -> ExecResult {
        decode::execute(inst, self)
    }
}
