//! Instruction encoding and field extraction utilities.
//!
//! Provides the operand fields shared by many A64 encodings as methods on the
//! raw instruction word. Family-specific fields live with the family's
//! handler; everything goes through [`bit`] and [`field`].

use crate::common::bits::{bit, field};

/// Trait for extracting common A64 fields from an encoded instruction.
pub trait InstructionBits {
    /// Top-level class selector, `op1` (bits 25-28).
    fn class_key(&self) -> u32;

    /// Destination register field `Rd` (bits 0-4).
    ///
    /// Index 31 is the zero register or SP depending on the instruction.
    fn rd(&self) -> usize;

    /// First source register field `Rn` (bits 5-9).
    fn rn(&self) -> usize;

    /// Second source register field `Rm` (bits 16-20).
    fn rm(&self) -> usize;

    /// Register width selector `sf` (bit 31): set for 64-bit forms.
    fn sf(&self) -> bool;

    /// Subtract selector `op` of add/sub encodings (bit 30).
    fn op(&self) -> bool;

    /// Set-flags selector `S` of add/sub encodings (bit 29).
    fn set_flags(&self) -> bool;

    /// Two-bit `opc` of logical and move-wide encodings (bits 29-30).
    fn opc(&self) -> u32;

    /// The `N` bit of bitmask and bitfield encodings (bit 22).
    fn n(&self) -> bool;

    /// The `imms` field (bits 10-15).
    fn imms(&self) -> u32;

    /// The `immr` field (bits 16-21).
    fn immr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn class_key(&self) -> u32 {
        field(*self, 25, 28)
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        field(*self, 0, 4) as usize
    }

    #[inline(always)]
    fn rn(&self) -> usize {
        field(*self, 5, 9) as usize
    }

    #[inline(always)]
    fn rm(&self) -> usize {
        field(*self, 16, 20) as usize
    }

    #[inline(always)]
    fn sf(&self) -> bool {
        bit(*self, 31)
    }

    #[inline(always)]
    fn op(&self) -> bool {
        bit(*self, 30)
    }

    #[inline(always)]
    fn set_flags(&self) -> bool {
        bit(*self, 29)
    }

    #[inline(always)]
    fn opc(&self) -> u32 {
        field(*self, 29, 30)
    }

    #[inline(always)]
    fn n(&self) -> bool {
        bit(*self, 22)
    }

    #[inline(always)]
    fn imms(&self) -> u32 {
        field(*self, 10, 15)
    }

    #[inline(always)]
    fn immr(&self) -> u32 {
        field(*self, 16, 21)
    }
}
