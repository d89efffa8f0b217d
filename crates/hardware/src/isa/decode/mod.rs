//! A64 Decode Dispatch Tree.
//!
//! This module classifies a raw 32-bit word and routes it to a leaf handler.
//! It performs:
//! 1. **Top-level classification:** `op1 = inst[28:25]` selects one of the
//!    instruction classes through a 16-entry table.
//! 2. **Per-class dispatch:** each class owns a dense table keyed by its own
//!    selector field (see the submodules), recursively, until a leaf.
//! 3. **Leaf execution:** leaves decode operand fields and either execute
//!    through the ALU and register file or report exactly why they cannot.
//!
//! Every table is a fixed-size array indexed by an extracted bit field, so its
//! length is the size of the encoding space at that level and a missing entry
//! is a compile error; every table element is an enum matched exhaustively.

/// Branches, exception generating and system instructions.
pub mod branch;

/// Data processing (immediate): the fully modelled family.
pub mod dp_imm;

/// Data processing (register).
pub mod dp_reg;

/// Loads and stores.
pub mod load_store;

/// Data processing (SIMD and floating point).
pub mod simd_fp;

use tracing::debug;

use crate::common::bits::bit;
use crate::common::{ExecError, ExecResult};
use crate::core::Cpu;
use crate::isa::encoding::{Family, InstructionClass};
use crate::isa::instruction::InstructionBits;

/// Top-level class for every value of `inst[28:25]`.
///
/// Index 0 is refined by bit 31 in [`classify`] (reserved vs. SME).
const CLASS_TABLE: [InstructionClass; 16] = {
    use InstructionClass as C;
    [
        C::Reserved,                // 0000
        C::Unallocated,             // 0001
        C::Sve,                     // 0010
        C::Unallocated,             // 0011
        C::LoadStore,               // 0100
        C::DataProcessingRegister,  // 0101
        C::LoadStore,               // 0110
        C::DataProcessingSimdFp,    // 0111
        C::DataProcessingImmediate, // 1000
        C::DataProcessingImmediate, // 1001
        C::BranchExceptionSystem,   // 1010
        C::BranchExceptionSystem,   // 1011
        C::LoadStore,               // 1100
        C::DataProcessingRegister,  // 1101
        C::LoadStore,               // 1110
        C::DataProcessingSimdFp,    // 1111
    ]
};

/// Returns the top-level class of `inst`.
///
/// # Examples
///
/// ```
/// use a64emu_core::isa::decode::classify;
/// use a64emu_core::isa::encoding::InstructionClass;
///
/// // add x1, x0, #0x7ff
/// assert_eq!(classify(0x911f_fc01), InstructionClass::DataProcessingImmediate);
/// // ret
/// assert_eq!(classify(0xd65f_03c0), InstructionClass::BranchExceptionSystem);
/// ```
pub fn classify(inst: u32) -> InstructionClass {
    match CLASS_TABLE[inst.class_key() as usize] {
        InstructionClass::Reserved if bit(inst, 31) => InstructionClass::Sme,
        class => class,
    }
}

/// Decodes and executes one instruction word against `cpu`.
///
/// Mutates only registers and flags; does not fetch, does not advance `pc`.
/// On `Err` nothing has been written.
pub fn execute(inst: u32, cpu: &mut Cpu) -> ExecResult {
    let class = classify(inst);
    match class {
        InstructionClass::Reserved | InstructionClass::Unallocated => {
            Err(ExecError::Unallocated { raw: inst, class })
        }
        InstructionClass::Sme => unimplemented_family(inst, Family::Sme),
        InstructionClass::Sve => unimplemented_family(inst, Family::Sve),
        InstructionClass::DataProcessingImmediate => dp_imm::execute(inst, cpu),
        InstructionClass::BranchExceptionSystem => branch::execute(inst),
        InstructionClass::LoadStore => load_store::execute(inst),
        InstructionClass::DataProcessingRegister => dp_reg::execute(inst),
        InstructionClass::DataProcessingSimdFp => simd_fp::execute(inst),
    }
}

/// Reports an allocated encoding whose semantics are not modelled.
pub(crate) fn unimplemented_family(raw: u32, family: Family) -> ExecResult {
    debug!(%family, "unimplemented instruction {raw:#010x}");
    Err(ExecError::Unimplemented { raw, family })
}

/// Reports an unallocated encoding found below the top level.
pub(crate) const fn unallocated(raw: u32, class: InstructionClass) -> ExecResult {
    Err(ExecError::Unallocated { raw, class })
}
