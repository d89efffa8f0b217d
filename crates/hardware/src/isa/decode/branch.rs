//! Branches, exception generating and system instructions.
//!
//! Dispatch on `op0 = inst[31:29]`. Every leaf is allocated but not yet
//! modelled, except the `011`/`111` rows and the upper half of `010`.

use super::{unallocated, unimplemented_family};
use crate::common::ExecResult;
use crate::common::bits::{bit, field};
use crate::isa::encoding::{Family, InstructionClass};

const CLASS: InstructionClass = InstructionClass::BranchExceptionSystem;

/// Instruction group within the branch class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchGroup {
    /// B, BL.
    UnconditionalImm,
    /// CBZ/CBNZ (bit 25 clear) or TBZ/TBNZ (bit 25 set).
    CompareOrTest,
    /// B.cond, BC.cond.
    ConditionalImm,
    /// Exception generation, hints, barriers, MSR/MRS and branch (register).
    System,
    /// No instruction.
    Unallocated,
}

/// Group for every value of `inst[31:29]`.
pub const GROUP_TABLE: [BranchGroup; 8] = [
    BranchGroup::UnconditionalImm, // 000
    BranchGroup::CompareOrTest,    // 001
    BranchGroup::ConditionalImm,   // 010
    BranchGroup::Unallocated,      // 011
    BranchGroup::UnconditionalImm, // 100
    BranchGroup::CompareOrTest,    // 101
    BranchGroup::System,           // 110
    BranchGroup::Unallocated,      // 111
];

/// Returns the group of a branch-class word.
pub fn group(inst: u32) -> BranchGroup {
    GROUP_TABLE[field(inst, 29, 31) as usize]
}

/// Executes a branch-class instruction.
pub fn execute(inst: u32) -> ExecResult {
    match group(inst) {
        BranchGroup::UnconditionalImm => unimplemented_family(inst, Family::UnconditionalBranchImm),
        BranchGroup::CompareOrTest if bit(inst, 25) => {
            unimplemented_family(inst, Family::TestAndBranch)
        }
        BranchGroup::CompareOrTest => unimplemented_family(inst, Family::CompareAndBranch),
        BranchGroup::ConditionalImm if bit(inst, 25) => unallocated(inst, CLASS),
        BranchGroup::ConditionalImm => unimplemented_family(inst, Family::ConditionalBranchImm),
        BranchGroup::System => unimplemented_family(inst, Family::SystemAndBranchReg),
        BranchGroup::Unallocated => unallocated(inst, CLASS),
    }
}
