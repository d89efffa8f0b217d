//! ALU logical operations and logical-immediate bitmasks.
//!
//! Implements AND/ORR/EOR, the ANDS flag rule, and the architectural
//! `DecodeBitMasks` algorithm that expands a logical immediate's compact
//! `(N, imms, immr)` fields into a full-width repeating pattern.
//!
//! The expansion works in three steps:
//! 1. **Element size:** The highest set bit of `N:NOT(imms)` gives `log2(esize)`.
//! 2. **Element:** `imms + 1` (within the element) ones, rotated right by `immr`.
//! 3. **Replication:** The element is tiled across the register width.

use super::RegWidth;
use crate::common::UndefinedReason;
use crate::core::arch::pstate::Nzcv;

/// Width of the `imms` and `immr` fields.
const IMM6_MASK: u32 = 0x3F;

/// Bitwise logical operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicOp {
    /// Bitwise AND.
    And,
    /// Bitwise inclusive OR.
    Orr,
    /// Bitwise exclusive OR.
    Eor,
}

/// Executes a logical operation at `width`; the result is zero-extended.
pub const fn execute(op: LogicOp, a: u64, b: u64, width: RegWidth) -> u64 {
    let result = match op {
        LogicOp::And => a & b,
        LogicOp::Orr => a | b,
        LogicOp::Eor => a ^ b,
    };
    result & width.mask()
}

/// Flags set by ANDS/BICS/TST: N and Z from the result, C and V cleared.
pub const fn logic_flags(result: u64, width: RegWidth) -> Nzcv {
    Nzcv {
        n: result & width.sign_bit() != 0,
        z: result & width.mask() == 0,
        c: false,
        v: false,
    }
}

/// A logical-immediate encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmaskImm {
    /// The `N` bit; set only for 64-bit elements.
    pub n: bool,
    /// The 6-bit `imms` field.
    pub imms: u32,
    /// The 6-bit `immr` field.
    pub immr: u32,
}

/// Mask of the low `esize` bits.
#[inline]
const fn element_mask(esize: u32) -> u64 {
    if esize >= 64 {
        u64::MAX
    } else {
        (1u64 << esize) - 1
    }
}

/// Rotates the low `esize` bits of `elem` right by `amount`.
#[inline]
const fn rotate_right_in(elem: u64, amount: u32, esize: u32) -> u64 {
    if amount == 0 {
        elem
    } else {
        ((elem >> amount) | (elem << (esize - amount))) & element_mask(esize)
    }
}

/// Tiles an `esize`-bit element across `width` bits.
#[inline]
const fn replicate(elem: u64, esize: u32, width: u32) -> u64 {
    let mut pattern = elem;
    let mut size = esize;
    while size < width {
        pattern |= pattern << size;
        size *= 2;
    }
    pattern
}

/// Expands a logical immediate.
///
/// # Arguments
///
/// * `n` - The `N` bit (instruction bit 22).
/// * `imms` - Instruction bits `[15:10]`.
/// * `immr` - Instruction bits `[21:16]`.
/// * `is64bit` - The `sf` bit.
///
/// # Returns
///
/// The 32- or 64-bit immediate (zero-extended), or the reason the encoding is
/// UNDEFINED.
///
/// # Examples
///
/// ```
/// use a64emu_core::core::units::alu::logic::decode_bitmask;
///
/// // and x0, x1, #0xff
/// assert_eq!(decode_bitmask(true, 0b000111, 0, true), Ok(0xff));
/// // orr w0, w1, #0x55555555
/// assert_eq!(decode_bitmask(false, 0b111100, 0, false), Ok(0x5555_5555));
/// ```
pub const fn decode_bitmask(
    n: bool,
    imms: u32,
    immr: u32,
    is64bit: bool,
) -> Result<u64, UndefinedReason> {
    debug_assert!(imms <= IMM6_MASK && immr <= IMM6_MASK, "imms/immr are 6-bit fields");

    if n && !is64bit {
        return Err(UndefinedReason::WideElementIn32BitForm);
    }

    let combined = ((n as u32) << 6) | (!imms & IMM6_MASK);
    if combined < 2 {
        return Err(UndefinedReason::ReservedElementSize);
    }

    // With N = 0 the element is at most 32 bits, so it always divides the width.
    let len = u32::BITS - 1 - combined.leading_zeros();
    let esize = 1u32 << len;
    let levels = esize - 1;

    let s = imms & levels;
    let r = immr & levels;
    if s == levels {
        return Err(UndefinedReason::AllOnesElement);
    }

    let welem = (1u64 << (s + 1)) - 1;
    let elem = rotate_right_in(welem, r, esize);
    Ok(replicate(elem, esize, RegWidth::from_sf(is64bit).bits()))
}

/// Finds an encoding for `value` as a logical immediate, if one exists.
///
/// Searches element sizes from smallest to largest and returns the first
/// encoding found, so `decode_bitmask` of the result yields `value` again.
/// Zero, all-ones, and values wider than the register never encode.
pub const fn encode_bitmask(value: u64, is64bit: bool) -> Option<BitmaskImm> {
    let width = RegWidth::from_sf(is64bit);
    let full = width.mask();
    if value == 0 || value == full || value & !full != 0 {
        return None;
    }

    let mut esize = 2u32;
    while esize <= width.bits() {
        let elem = value & element_mask(esize);
        if replicate(elem, esize, width.bits()) == value {
            let ones = elem.count_ones();
            let run = (1u64 << ones) - 1;
            // Undo the right rotation: find the rotation that brings the run to bit 0.
            let mut r = 0;
            while r < esize {
                if rotate_right_in(run, r, esize) == elem {
                    return Some(BitmaskImm {
                        n: esize == 64,
                        imms: (!(esize * 2 - 1) & IMM6_MASK) | (ones - 1),
                        immr: r,
                    });
                }
                r += 1;
            }
            return None;
        }
        esize *= 2;
    }
    None
}
