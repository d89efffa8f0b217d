//! AArch64 General-Purpose Register File.
//!
//! This module implements storage for `x0`-`x30`. It performs the following:
//! 1. **Storage:** Maintains 31 64-bit registers.
//! 2. **Bounds:** Index 31 is not storage; it names either the zero register or
//!    the stack pointer depending on the instruction, and is resolved by
//!    [`Cpu`](crate::core::Cpu) before reaching this file. Reads of index 31
//!    here return 0 and writes are discarded.

use crate::common::constants::GPR_COUNT;

/// General-purpose register file (`x0`-`x30`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; GPR_COUNT],
}

impl Gpr {
    /// Creates a register file with every register set to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; GPR_COUNT],
        }
    }

    /// Reads register `idx`.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Index 31 reads as zero.
    #[inline(always)]
    pub fn read(&self, idx: usize) -> u64 {
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes register `idx`.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to index 31 are discarded.
    /// * `val` - The 64-bit value to write.
    #[inline(always)]
    pub fn write(&mut self, idx: usize, val: u64) {
        if let Some(reg) = self.regs.get_mut(idx) {
            *reg = val;
        }
    }

    /// Returns all 31 registers in index order.
    pub const fn as_slice(&self) -> &[u64; GPR_COUNT] {
        &self.regs
    }
}
