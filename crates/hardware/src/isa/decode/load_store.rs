//! Loads and stores.
//!
//! Dispatch on `op0 = inst[29:28]`; no memory semantics are modelled yet.

use super::unimplemented_family;
use crate::common::ExecResult;
use crate::common::bits::field;
use crate::isa::encoding::Family;

/// Family for every value of `inst[29:28]`.
pub const FAMILY_TABLE: [Family; 4] = [
    Family::LoadStoreExclusiveAndStructures, // 00
    Family::LoadLiteral,                     // 01
    Family::LoadStorePair,                   // 10
    Family::LoadStoreRegister,               // 11
];

/// Executes a load/store instruction.
pub fn execute(inst: u32) -> ExecResult {
    unimplemented_family(inst, FAMILY_TABLE[field(inst, 28, 29) as usize])
}
