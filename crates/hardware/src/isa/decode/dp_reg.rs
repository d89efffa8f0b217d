//! Data Processing (Register).
//!
//! Two levels of dispatch:
//! 1. **Group:** bits 28 and 24 select logical, add/sub, the miscellaneous
//!    group or 3-source.
//! 2. **Miscellaneous:** `inst[23:21]` selects carry arithmetic, conditional
//!    compare, conditional select or 1/2-source; `op3 = inst[15:10]` further
//!    splits carry arithmetic from flag manipulation.

use super::{unallocated, unimplemented_family};
use crate::common::ExecResult;
use crate::common::bits::{bit, field};
use crate::isa::encoding::{Family, InstructionClass};

const CLASS: InstructionClass = InstructionClass::DataProcessingRegister;

/// Instruction group within data processing (register).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DpRegGroup {
    /// AND, BIC, ORR, ORN, EOR, EON, ANDS, BICS (shifted register).
    Logical,
    /// ADD/SUB (shifted or extended register).
    AddSub,
    /// See [`MiscGroup`].
    Misc,
    /// MADD, MSUB and the widening multiplies.
    ThreeSource,
}

/// Group for every value of `inst[28]:inst[24]`.
pub const GROUP_TABLE: [DpRegGroup; 4] = [
    DpRegGroup::Logical,     // 0:0
    DpRegGroup::AddSub,      // 0:1
    DpRegGroup::Misc,        // 1:0
    DpRegGroup::ThreeSource, // 1:1
];

/// Miscellaneous sub-group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MiscGroup {
    /// ADC/SBC or RMIF/SETF, split on `op3`.
    CarryOrFlags,
    /// CCMN, CCMP.
    ConditionalCompare,
    /// CSEL, CSINC, CSINV, CSNEG.
    ConditionalSelect,
    /// Single- and two-source operations (CLZ, RBIT, UDIV, LSLV, ...).
    Source1Or2,
    /// No instruction.
    Unallocated,
}

/// Sub-group for every value of `inst[23:21]`.
pub const MISC_TABLE: [MiscGroup; 8] = [
    MiscGroup::CarryOrFlags,       // 000
    MiscGroup::Unallocated,        // 001
    MiscGroup::ConditionalCompare, // 010
    MiscGroup::Unallocated,        // 011
    MiscGroup::ConditionalSelect,  // 100
    MiscGroup::Unallocated,        // 101
    MiscGroup::Source1Or2,         // 110
    MiscGroup::Unallocated,        // 111
];

/// Returns the group of a data-processing (register) word.
pub fn group(inst: u32) -> DpRegGroup {
    let key = ((bit(inst, 28) as usize) << 1) | bit(inst, 24) as usize;
    GROUP_TABLE[key]
}

/// Executes a data-processing (register) instruction.
pub fn execute(inst: u32) -> ExecResult {
    match group(inst) {
        DpRegGroup::Logical => unimplemented_family(inst, Family::LogicalShiftedReg),
        DpRegGroup::AddSub => unimplemented_family(inst, Family::AddSubReg),
        DpRegGroup::Misc => misc(inst),
        DpRegGroup::ThreeSource => unimplemented_family(inst, Family::DataProcessing3Source),
    }
}

fn misc(inst: u32) -> ExecResult {
    match MISC_TABLE[field(inst, 21, 23) as usize] {
        MiscGroup::CarryOrFlags => carry_or_flags(inst),
        MiscGroup::ConditionalCompare => unimplemented_family(inst, Family::ConditionalCompare),
        MiscGroup::ConditionalSelect => unimplemented_family(inst, Family::ConditionalSelect),
        MiscGroup::Source1Or2 => unimplemented_family(inst, Family::DataProcessing1Or2Source),
        MiscGroup::Unallocated => unallocated(inst, CLASS),
    }
}

fn carry_or_flags(inst: u32) -> ExecResult {
    let op3 = field(inst, 10, 15);
    if op3 == 0 {
        unimplemented_family(inst, Family::AddSubWithCarry)
    } else if op3 & 0b01_1111 == 0b00_0001 || op3 & 0b00_1111 == 0b00_0010 {
        unimplemented_family(inst, Family::FlagManipulation)
    } else {
        unallocated(inst, CLASS)
    }
}
