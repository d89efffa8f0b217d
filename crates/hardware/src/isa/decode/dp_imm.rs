//! Data Processing (Immediate).
//!
//! Second-level dispatch on `op0 = inst[25:23]` and the leaf handlers of the
//! family. ADD/SUB (immediate) and logical (immediate) execute fully; the
//! other groups decode their fields, reject unallocated encodings, and report
//! themselves as unimplemented.
//!
//! Register index 31 is resolved per operand:
//!
//! | Form              | `Rd` | `Rn` |
//! |-------------------|------|------|
//! | ADD/SUB           | SP   | SP   |
//! | ADDS/SUBS         | ZR   | SP   |
//! | AND/ORR/EOR       | SP   | ZR   |
//! | ANDS              | ZR   | ZR   |

use tracing::debug;

use super::{unallocated, unimplemented_family};
use crate::common::{ExecError, ExecResult, UndefinedReason};
use crate::common::bits::{bit, field, truncate64to32};
use crate::core::cpu::{Cpu, Reg31};
use crate::core::units::alu::logic::decode_bitmask;
use crate::core::units::alu::{Alu, AluOp, AluResult, RegWidth};
use crate::isa::encoding::{Family, InstructionClass};
use crate::isa::instruction::InstructionBits;

const CLASS: InstructionClass = InstructionClass::DataProcessingImmediate;

/// Shift applied to `imm12` when the `sh` bit is set (`LSL #12`).
const IMM12_SHIFT: u32 = 12;

/// Instruction group within data processing (immediate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DpImmGroup {
    /// ADR, ADRP.
    PcRel,
    /// ADD, ADDS, SUB, SUBS (immediate).
    AddSubImm,
    /// ADDG, SUBG.
    AddSubImmWithTags,
    /// AND, ORR, EOR, ANDS (immediate).
    LogicalImm,
    /// MOVN, MOVZ, MOVK.
    MoveWide,
    /// SBFM, BFM, UBFM.
    Bitfield,
    /// EXTR.
    Extract,
}

/// Group for every value of `inst[25:23]`.
pub const GROUP_TABLE: [DpImmGroup; 8] = [
    DpImmGroup::PcRel,             // 000
    DpImmGroup::PcRel,             // 001
    DpImmGroup::AddSubImm,         // 010
    DpImmGroup::AddSubImmWithTags, // 011
    DpImmGroup::LogicalImm,        // 100
    DpImmGroup::MoveWide,          // 101
    DpImmGroup::Bitfield,          // 110
    DpImmGroup::Extract,           // 111
];

/// ALU operation for ADD/SUB (immediate), indexed by `[op][S]`.
const ADD_SUB_OPS: [[AluOp; 2]; 2] = [[AluOp::Add, AluOp::Adds], [AluOp::Sub, AluOp::Subs]];

/// ALU operation for logical (immediate), indexed by `opc`.
const LOGICAL_OPS: [AluOp; 4] = [AluOp::And, AluOp::Orr, AluOp::Eor, AluOp::Ands];

/// Returns the group of a data-processing (immediate) word.
pub fn group(inst: u32) -> DpImmGroup {
    GROUP_TABLE[field(inst, 23, 25) as usize]
}

/// Executes a data-processing (immediate) instruction.
pub fn execute(inst: u32, cpu: &mut Cpu) -> ExecResult {
    match group(inst) {
        DpImmGroup::PcRel => pc_rel(inst),
        DpImmGroup::AddSubImm => add_sub_imm(inst, cpu),
        DpImmGroup::AddSubImmWithTags => add_sub_imm_tags(inst),
        DpImmGroup::LogicalImm => logical_imm(inst, cpu),
        DpImmGroup::MoveWide => move_wide(inst),
        DpImmGroup::Bitfield => bitfield(inst),
        DpImmGroup::Extract => extract(inst),
    }
}

/// Operand fields of ADD/SUB (immediate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddSubImm {
    /// Destination register.
    pub rd: usize,
    /// Source register.
    pub rn: usize,
    /// Unsigned 12-bit immediate.
    pub imm12: u32,
    /// `LSL #12` selector.
    pub shift: bool,
    /// Flag-setting form.
    pub set_flags: bool,
    /// Subtract form.
    pub sub: bool,
    /// Operand width.
    pub width: RegWidth,
}

impl AddSubImm {
    /// Extracts the fields of `raw`.
    pub fn decode(raw: u32) -> Self {
        Self {
            rd: raw.rd(),
            rn: raw.rn(),
            imm12: field(raw, 10, 21),
            shift: bit(raw, 22),
            set_flags: raw.set_flags(),
            sub: raw.op(),
            width: RegWidth::from_sf(raw.sf()),
        }
    }

    /// The immediate operand after the optional `LSL #12`.
    pub const fn imm(&self) -> u64 {
        if self.shift {
            (self.imm12 as u64) << IMM12_SHIFT
        } else {
            self.imm12 as u64
        }
    }

    /// The ALU operation selected by `op` and `S`.
    pub const fn alu_op(&self) -> AluOp {
        ADD_SUB_OPS[self.sub as usize][self.set_flags as usize]
    }
}

/// Operand fields of logical (immediate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogicalImm {
    /// Destination register.
    pub rd: usize,
    /// Source register.
    pub rn: usize,
    /// Bitmask `imms`.
    pub imms: u32,
    /// Bitmask `immr`.
    pub immr: u32,
    /// Bitmask `N`.
    pub n: bool,
    /// Operation selector.
    pub opc: u32,
    /// Operand width.
    pub width: RegWidth,
}

impl LogicalImm {
    /// Extracts the fields of `raw`.
    pub fn decode(raw: u32) -> Self {
        Self {
            rd: raw.rd(),
            rn: raw.rn(),
            imms: raw.imms(),
            immr: raw.immr(),
            n: raw.n(),
            opc: raw.opc(),
            width: RegWidth::from_sf(raw.sf()),
        }
    }

    /// The ALU operation selected by `opc`.
    pub const fn alu_op(&self) -> AluOp {
        LOGICAL_OPS[self.opc as usize]
    }
}

/// Operand fields of ADR/ADRP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcRel {
    /// Destination register.
    pub rd: usize,
    /// Set for ADRP (page-granular).
    pub page: bool,
    /// Signed 21-bit offset, `immhi:immlo`.
    pub imm: i64,
}

impl PcRel {
    /// Extracts the fields of `raw`.
    pub fn decode(raw: u32) -> Self {
        let imm = (field(raw, 5, 23) << 2) | field(raw, 29, 30);
        Self {
            rd: raw.rd(),
            page: raw.sf(),
            // 21-bit sign extension.
            imm: (((imm << 11) as i32) >> 11) as i64,
        }
    }
}

/// Operand fields of ADDG/SUBG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddSubImmTags {
    /// Destination register.
    pub rd: usize,
    /// Source register.
    pub rn: usize,
    /// Tag offset.
    pub uimm4: u32,
    /// Must be zero.
    pub op3: u32,
    /// Address offset in granules.
    pub uimm6: u32,
    /// Must be zero.
    pub o2: bool,
    /// Subtract form.
    pub sub: bool,
    /// Must be clear.
    pub set_flags: bool,
    /// Must be set.
    pub sf: bool,
}

impl AddSubImmTags {
    /// Extracts the fields of `raw`.
    pub fn decode(raw: u32) -> Self {
        Self {
            rd: raw.rd(),
            rn: raw.rn(),
            uimm4: field(raw, 10, 13),
            op3: field(raw, 14, 15),
            uimm6: field(raw, 16, 21),
            o2: bit(raw, 22),
            sub: raw.op(),
            set_flags: raw.set_flags(),
            sf: raw.sf(),
        }
    }
}

/// Operand fields of MOVN/MOVZ/MOVK.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveWide {
    /// Destination register.
    pub rd: usize,
    /// 16-bit immediate.
    pub imm16: u32,
    /// Halfword position (shift is `hw * 16`).
    pub hw: u32,
    /// Operation selector.
    pub opc: u32,
    /// Operand width.
    pub width: RegWidth,
}

impl MoveWide {
    /// Extracts the fields of `raw`.
    pub fn decode(raw: u32) -> Self {
        Self {
            rd: raw.rd(),
            imm16: field(raw, 5, 20),
            hw: field(raw, 21, 22),
            opc: raw.opc(),
            width: RegWidth::from_sf(raw.sf()),
        }
    }
}

/// Operand fields of SBFM/BFM/UBFM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitfield {
    /// Destination register.
    pub rd: usize,
    /// Source register.
    pub rn: usize,
    /// Leftmost source bit.
    pub imms: u32,
    /// Right rotation.
    pub immr: u32,
    /// Must equal `sf`.
    pub n: bool,
    /// Operation selector.
    pub opc: u32,
    /// Set for the 64-bit form.
    pub sf: bool,
}

impl Bitfield {
    /// Extracts the fields of `raw`.
    pub fn decode(raw: u32) -> Self {
        Self {
            rd: raw.rd(),
            rn: raw.rn(),
            imms: raw.imms(),
            immr: raw.immr(),
            n: raw.n(),
            opc: raw.opc(),
            sf: raw.sf(),
        }
    }
}

/// Operand fields of EXTR.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extract {
    /// Destination register.
    pub rd: usize,
    /// High-half source register.
    pub rn: usize,
    /// Low-half source register.
    pub rm: usize,
    /// Least significant bit extracted.
    pub imms: u32,
    /// Must be zero.
    pub o0: bool,
    /// Must equal `sf`.
    pub n: bool,
    /// Must be zero.
    pub op21: u32,
    /// Set for the 64-bit form.
    pub sf: bool,
}

impl Extract {
    /// Extracts the fields of `raw`.
    pub fn decode(raw: u32) -> Self {
        Self {
            rd: raw.rd(),
            rn: raw.rn(),
            rm: raw.rm(),
            imms: raw.imms(),
            o0: bit(raw, 21),
            n: raw.n(),
            op21: raw.opc(),
            sf: raw.sf(),
        }
    }
}

/// Commits an ALU result: the value to `rd` (zero-extended for W forms),
/// then the flags if the operation produced any.
#[inline]
fn write_back(cpu: &mut Cpu, rd: usize, r31: Reg31, result: AluResult, width: RegWidth) {
    let value = match width {
        RegWidth::W32 => truncate64to32(result.value),
        RegWidth::X64 => result.value,
    };
    cpu.write_reg(rd, value, r31);
    if let Some(nzcv) = result.flags {
        cpu.flags.set_nzcv(nzcv);
    }
}

fn add_sub_imm(inst: u32, cpu: &mut Cpu) -> ExecResult {
    let f = AddSubImm::decode(inst);
    let op = f.alu_op();
    let rd_r31 = if op.sets_flags() { Reg31::Zr } else { Reg31::Sp };

    let a = cpu.read_reg(f.rn, Reg31::Sp);
    let result = Alu::execute(op, a, f.imm(), f.width);
    write_back(cpu, f.rd, rd_r31, result, f.width);
    Ok(())
}

fn logical_imm(inst: u32, cpu: &mut Cpu) -> ExecResult {
    let f = LogicalImm::decode(inst);
    let imm = decode_bitmask(f.n, f.imms, f.immr, f.width == RegWidth::X64)
        .map_err(|reason| ExecError::Undefined { raw: inst, reason })?;
    let op = f.alu_op();
    let rd_r31 = if op.sets_flags() { Reg31::Zr } else { Reg31::Sp };

    let a = cpu.read_reg(f.rn, Reg31::Zr);
    let result = Alu::execute(op, a, imm, f.width);
    write_back(cpu, f.rd, rd_r31, result, f.width);
    Ok(())
}

fn pc_rel(inst: u32) -> ExecResult {
    let f = PcRel::decode(inst);
    debug!(rd = f.rd, page = f.page, imm = f.imm, "adr/adrp");
    unimplemented_family(inst, Family::PcRelAddressing)
}

fn add_sub_imm_tags(inst: u32) -> ExecResult {
    let f = AddSubImmTags::decode(inst);
    if !f.sf || f.set_flags || f.o2 {
        return unallocated(inst, CLASS);
    }
    debug!(
        rd = f.rd,
        rn = f.rn,
        uimm6 = f.uimm6,
        uimm4 = f.uimm4,
        sub = f.sub,
        "addg/subg"
    );
    unimplemented_family(inst, Family::AddSubImmWithTags)
}

fn move_wide(inst: u32) -> ExecResult {
    let f = MoveWide::decode(inst);
    if f.opc == 0b01 || (f.width == RegWidth::W32 && f.hw >= 2) {
        return unallocated(inst, CLASS);
    }
    debug!(rd = f.rd, imm16 = f.imm16, hw = f.hw, opc = f.opc, "move wide");
    unimplemented_family(inst, Family::MoveWideImm)
}

fn bitfield(inst: u32) -> ExecResult {
    let f = Bitfield::decode(inst);
    if f.opc == 0b11 || f.sf != f.n {
        return unallocated(inst, CLASS);
    }
    if !f.sf && (bit(f.immr, 5) || bit(f.imms, 5)) {
        return Err(ExecError::Undefined {
            raw: inst,
            reason: UndefinedReason::BitPositionOutOfRange,
        });
    }
    debug!(
        rd = f.rd,
        rn = f.rn,
        immr = f.immr,
        imms = f.imms,
        opc = f.opc,
        "bitfield move"
    );
    unimplemented_family(inst, Family::Bitfield)
}

fn extract(inst: u32) -> ExecResult {
    let f = Extract::decode(inst);
    if f.op21 != 0 || f.o0 || f.sf != f.n || (!f.sf && bit(f.imms, 5)) {
        return unallocated(inst, CLASS);
    }
    debug!(rd = f.rd, rn = f.rn, rm = f.rm, lsb = f.imms, "extr");
    unimplemented_family(inst, Family::Extract)
}
