//! Global Emulator Constants.
//!
//! This module defines constants shared across the emulator. It includes:
//! 1. **Memory Constants:** Page size and alignment used by the loader.
//! 2. **Instruction Constants:** A64 instruction size and alignment.
//! 3. **Register Constants:** Sizes of the architectural register banks.

/// Page size in bytes (4KB).
pub const PAGE_SIZE: u64 = 4096;

/// Size of every A64 instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Required alignment of the program counter at fetch.
pub const INSTRUCTION_ALIGN: u64 = INSTRUCTION_SIZE;

/// Number of general-purpose registers backed by storage (`x0`-`x30`).
pub const GPR_COUNT: usize = 31;

/// Encoding of register index 31 (the zero register or the stack pointer).
pub const REG_31: usize = 31;

/// Number of exception levels with banked `SP_ELx` / `ELR_ELx` registers.
pub const EL_COUNT: usize = 4;

/// Alignment the AArch64 procedure call standard requires of SP.
pub const STACK_ALIGN: u64 = 16;

/// Rounds `value` up to the next multiple of [`PAGE_SIZE`].
#[inline]
pub const fn page_round_up(value: u64) -> u64 {
    value.saturating_add(PAGE_SIZE - 1) & !(PAGE_SIZE - 1)
}
