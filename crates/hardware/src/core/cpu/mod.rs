//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the architectural register
//! file of one emulated AArch64 core. It holds:
//! 1. **General Registers:** `x0`-`x30` and the program counter.
//! 2. **Banked Registers:** `SP_ELx` and `ELR_ELx` for the four exception levels.
//! 3. **Condition Flags:** N, Z, C, V and Q.
//!
//! Register index 31 is never storage. Each read and write names what index 31
//! means for that operand through [`Reg31`], so the zero-register / stack-pointer
//! split is decided once per operand by the decoding handler.

/// Instruction execution entry point.
pub mod execution;

use std::fmt;

use crate::common::constants::{EL_COUNT, GPR_COUNT, REG_31};
use crate::core::arch::gpr::Gpr;
use crate::core::arch::mode::ExceptionLevel;
use crate::core::arch::pstate::Flags;

/// Meaning of register index 31 for one operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg31 {
    /// The zero register: reads return 0, writes are discarded.
    Zr,
    /// The stack pointer of the current exception level.
    Sp,
}

/// Architectural state of one AArch64 core.
///
/// Created once at process start, mutated in place by every executed
/// instruction, and owned by a single execution context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cpu {
    /// General-purpose registers `x0`-`x30`.
    pub regs: Gpr,
    /// Program counter.
    pub pc: u64,
    /// Banked stack pointers, indexed by exception level.
    pub sp_el: [u64; EL_COUNT],
    /// Banked exception link registers, indexed by exception level.
    pub elr_el: [u64; EL_COUNT],
    /// Condition flags.
    pub flags: Flags,
    /// Current exception level.
    pub el: ExceptionLevel,
}

impl Cpu {
    /// Creates a CPU at EL0 with every register and flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a CPU ready to run a freshly loaded program.
    ///
    /// # Arguments
    ///
    /// * `entry` - Initial program counter.
    /// * `sp` - Initial stack pointer for EL0.
    pub fn with_entry(entry: u64, sp: u64) -> Self {
        let mut cpu = Self::new();
        cpu.pc = entry;
        cpu.sp_el[ExceptionLevel::El0.index()] = sp;
        cpu
    }

    /// Reads a register operand.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register field value (0-31).
    /// * `r31` - What index 31 means for this operand.
    #[inline(always)]
    pub fn read_reg(&self, idx: usize, r31: Reg31) -> u64 {
        match (idx, r31) {
            (REG_31, Reg31::Zr) => 0,
            (REG_31, Reg31::Sp) => self.sp(),
            _ => self.regs.read(idx),
        }
    }

    /// Writes a register operand.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register field value (0-31).
    /// * `val` - Value to store.
    /// * `r31` - What index 31 means for this operand.
    #[inline(always)]
    pub fn write_reg(&mut self, idx: usize, val: u64, r31: Reg31) {
        match (idx, r31) {
            (REG_31, Reg31::Zr) => {}
            (REG_31, Reg31::Sp) => self.set_sp(val),
            _ => self.regs.write(idx, val),
        }
    }

    /// Reads `x<idx>`, treating index 31 as the zero register.
    #[inline(always)]
    pub fn x(&self, idx: usize) -> u64 {
        self.read_reg(idx, Reg31::Zr)
    }

    /// Writes `x<idx>`, treating index 31 as the zero register.
    #[inline(always)]
    pub fn set_x(&mut self, idx: usize, val: u64) {
        self.write_reg(idx, val, Reg31::Zr);
    }

    /// Stack pointer of the current exception level.
    #[inline(always)]
    pub const fn sp(&self) -> u64 {
        self.sp_el[self.el.index()]
    }

    /// Sets the stack pointer of the current exception level.
    #[inline(always)]
    pub const fn set_sp(&mut self, val: u64) {
        self.sp_el[self.el.index()] = val;
    }

    /// Exception link register of the current exception level.
    pub const fn elr(&self) -> u64 {
        self.elr_el[self.el.index()]
    }

    /// Prints the register state to stdout.
    pub fn dump_state(&self) {
        println!("{self}");
    }
}

impl fmt::Display for Cpu {
    /// Formats registers two per line, followed by pc, SP and flags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regs = self.regs.as_slice();
        for pair in (0..GPR_COUNT).step_by(2) {
            write!(f, "x{:<2}={:#018x}", pair, regs[pair])?;
            if pair + 1 < GPR_COUNT {
                write!(f, " x{:<2}={:#018x}", pair + 1, regs[pair + 1])?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "pc ={:#018x} sp ={:#018x} {} {}",
            self.pc,
            self.sp(),
            self.flags,
            self.el
        )
    }
}
