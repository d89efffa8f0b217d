//! Data processing (SIMD and floating point).

use super::unimplemented_family;
use crate::common::ExecResult;
use crate::common::bits::bit;
use crate::isa::encoding::Family;

/// Family for each value of bit 28.
pub const FAMILY_TABLE: [Family; 2] = [Family::SimdVector, Family::FpScalar];

/// Executes a SIMD/FP instruction.
pub fn execute(inst: u32) -> ExecResult {
    unimplemented_family(inst, FAMILY_TABLE[bit(inst, 28) as usize])
}
