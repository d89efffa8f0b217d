//! Bit-field extraction over instruction words.
//!
//! Every operand field the decoder reads goes through these three functions:
//! 1. **`bit`:** A single bit as a boolean.
//! 2. **`field`:** An inclusive bit range, right-aligned.
//! 3. **`truncate64to32`:** Clearing the upper half of a 64-bit value for W-forms.
//!
//! The bit positions are fixed by the A64 encoding tables, so an out-of-range
//! position is a bug in the decoder rather than a property of the input word.
//! Those contract faults are caught by debug assertions.

/// Highest valid bit position within a 32-bit instruction word.
pub const WORD_MSB: u32 = 31;

/// Mask selecting the low 32 bits of a 64-bit register value.
pub const LOW32_MASK: u64 = 0xFFFF_FFFF;

/// Returns bit `n` (0 = least significant) of `word`.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction word.
/// * `n` - Bit position, `0..=31`.
#[inline(always)]
pub const fn bit(word: u32, n: u32) -> bool {
    debug_assert!(n <= WORD_MSB, "bit position out of range");
    (word >> n) & 1 != 0
}

/// Returns the inclusive bit range `[lo, hi]` of `word`, shifted so that bit
/// `lo` becomes bit 0 of the result.
///
/// # Arguments
///
/// * `word` - The 32-bit instruction word.
/// * `lo` - Lowest bit of the field.
/// * `hi` - Highest bit of the field; must satisfy `lo <= hi <= 31`.
///
/// # Examples
///
/// ```
/// use a64emu_core::common::bits::field;
///
/// // rd of `add x1, x0, #0x7ff`
/// assert_eq!(field(0x911f_fc01, 0, 4), 1);
/// // imm12 of the same word
/// assert_eq!(field(0x911f_fc01, 10, 21), 0x7ff);
/// ```
#[inline(always)]
pub const fn field(word: u32, lo: u32, hi: u32) -> u32 {
    debug_assert!(lo <= hi && hi <= WORD_MSB, "bit range out of range");
    (word >> lo) & (u32::MAX >> (WORD_MSB - (hi - lo)))
}

/// Clears bits 32..=63 of `value`.
///
/// Used whenever a 32-bit register form writes back, so the stale upper half
/// of the 64-bit storage never leaks into the W view.
#[inline(always)]
pub const fn truncate64to32(value: u64) -> u64 {
    value & LOW32_MASK
}
