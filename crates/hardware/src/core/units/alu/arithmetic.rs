//! ALU arithmetic: the `AddWithCarry` primitive.
//!
//! ADD, SUB, ADDS, SUBS and (later) CMP/CMN, ADC and SBC are all expressed
//! through one primitive. Subtraction is `a + !b + 1`. The flag-less entry
//! points discard the flags of the same computation, so there is exactly one
//! arithmetic path.
//!
//! Arithmetic is done in 128-bit integers and narrowed afterwards, which
//! makes C (unsigned overflow) and V (signed overflow) a direct comparison
//! against the exact sum.

use super::RegWidth;
use crate::core::arch::pstate::Nzcv;

/// Computes `a + b + carry_in` at `width`, returning the wrapped result and
/// the N, Z, C, V flags it produces.
///
/// Operands are first truncated to `width`; the result is zero-extended.
///
/// # Arguments
///
/// * `a` - First operand.
/// * `b` - Second operand (already inverted by the caller for subtraction).
/// * `carry_in` - Incoming carry (1 for subtraction).
/// * `width` - Operation width.
#[inline]
pub const fn add_with_carry_sized(a: u64, b: u64, carry_in: bool, width: RegWidth) -> (u64, Nzcv) {
    let mask = width.mask();
    let a = a & mask;
    let b = b & mask;

    let unsigned_sum = a as u128 + b as u128 + carry_in as u128;
    let signed_sum = width.sign_extend(a) as i128 + width.sign_extend(b) as i128 + carry_in as i128;
    let result = unsigned_sum as u64 & mask;

    let nzcv = Nzcv {
        n: result & width.sign_bit() != 0,
        z: result == 0,
        c: unsigned_sum != result as u128,
        v: signed_sum != width.sign_extend(result) as i128,
    };
    (result, nzcv)
}

/// Flag-less form of [`add_with_carry_sized`].
#[inline]
pub const fn add_no_flags_sized(a: u64, b: u64, carry_in: bool, width: RegWidth) -> u64 {
    add_with_carry_sized(a, b, carry_in, width).0
}

/// 64-bit `AddWithCarry`: `(a + b + carry_in) mod 2^64` and its flags.
///
/// # Examples
///
/// ```
/// use a64emu_core::core::units::alu::arithmetic::add_with_carry;
///
/// let (result, nzcv) = add_with_carry(u64::MAX, 1, false);
/// assert_eq!(result, 0);
/// assert!(nzcv.z && nzcv.c && !nzcv.n && !nzcv.v);
/// ```
#[inline]
pub const fn add_with_carry(a: u64, b: u64, carry_in: bool) -> (u64, Nzcv) {
    add_with_carry_sized(a, b, carry_in, RegWidth::X64)
}

/// 64-bit flag-less addition; identical result to [`add_with_carry`].
#[inline]
pub const fn add_no_flags(a: u64, b: u64, carry_in: bool) -> u64 {
    add_no_flags_sized(a, b, carry_in, RegWidth::X64)
}
