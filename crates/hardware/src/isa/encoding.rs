//! A64 encoding-space taxonomy.
//!
//! Names for the places a 32-bit word can land in the decode tree. They are used
//! by the dispatcher to route words and by [`ExecError`](crate::common::ExecError)
//! to say exactly where decoding stopped:
//! 1. **`InstructionClass`:** The top-level group selected by bits `[28:25]`.
//! 2. **`Family`:** A leaf family whose semantics are not modelled yet.

use std::fmt;

/// Top-level A64 instruction class.
///
/// Selected by `op1 = inst[28:25]`, with `op0 = inst[31]` separating the
/// reserved space from SME when `op1 == 0000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionClass {
    /// Reserved encoding space (`op0 = 0`, `op1 = 0000`), home of `UDF`.
    Reserved,
    /// Scalable Matrix Extension (`op0 = 1`, `op1 = 0000`).
    Sme,
    /// Unallocated top-level space (`op1 = 0001` and `0011`).
    Unallocated,
    /// Scalable Vector Extension (`op1 = 0010`).
    Sve,
    /// Data processing with an immediate operand (`op1 = 100x`).
    DataProcessingImmediate,
    /// Branches, exception generation and system instructions (`op1 = 101x`).
    BranchExceptionSystem,
    /// Loads and stores (`op1 = x1x0`).
    LoadStore,
    /// Data processing with register operands (`op1 = x101`).
    DataProcessingRegister,
    /// Scalar floating point and Advanced SIMD (`op1 = x111`).
    DataProcessingSimdFp,
}

impl InstructionClass {
    /// Returns the human-readable name of the class.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Sme => "SME",
            Self::Unallocated => "unallocated",
            Self::Sve => "SVE",
            Self::DataProcessingImmediate => "data processing (immediate)",
            Self::BranchExceptionSystem => "branches, exception generating and system",
            Self::LoadStore => "loads and stores",
            Self::DataProcessingRegister => "data processing (register)",
            Self::DataProcessingSimdFp => "data processing (SIMD and FP)",
        }
    }
}

impl fmt::Display for InstructionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An architecturally valid instruction family whose semantics are not yet
/// modelled.
///
/// Returned inside [`ExecError::Unimplemented`](crate::common::ExecError::Unimplemented)
/// so callers and tests can tell precisely which part of the instruction set
/// a program needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// SME encodings.
    Sme,
    /// SVE encodings.
    Sve,
    /// `ADR` / `ADRP`.
    PcRelAddressing,
    /// `ADDG` / `SUBG`.
    AddSubImmWithTags,
    /// `MOVN` / `MOVZ` / `MOVK`.
    MoveWideImm,
    /// `SBFM` / `BFM` / `UBFM`.
    Bitfield,
    /// `EXTR`.
    Extract,
    /// `B` / `BL`.
    UnconditionalBranchImm,
    /// `CBZ` / `CBNZ`.
    CompareAndBranch,
    /// `TBZ` / `TBNZ`.
    TestAndBranch,
    /// `B.cond` and `BC.cond`.
    ConditionalBranchImm,
    /// Exception generation, hints, barriers, system registers and `BR`/`BLR`/`RET`.
    SystemAndBranchReg,
    /// Exclusive/ordered accesses and Advanced SIMD structure transfers.
    LoadStoreExclusiveAndStructures,
    /// PC-relative literal loads and memory copy/set.
    LoadLiteral,
    /// `LDP` / `STP` and their variants.
    LoadStorePair,
    /// Single-register loads, stores and atomics.
    LoadStoreRegister,
    /// `AND` / `ORR` / `EOR` / `BIC` ... (shifted register).
    LogicalShiftedReg,
    /// `ADD` / `SUB` (shifted or extended register).
    AddSubReg,
    /// `ADC` / `SBC`.
    AddSubWithCarry,
    /// `RMIF`, `SETF8`, `SETF16`.
    FlagManipulation,
    /// `CCMP` / `CCMN`.
    ConditionalCompare,
    /// `CSEL` / `CSINC` / `CSINV` / `CSNEG`.
    ConditionalSelect,
    /// One- and two-source data processing (`CLZ`, `RBIT`, `UDIV`, `LSLV` ...).
    DataProcessing1Or2Source,
    /// Three-source data processing (`MADD`, `SMULH` ...).
    DataProcessing3Source,
    /// Advanced SIMD vector and cryptographic instructions.
    SimdVector,
    /// Scalar floating point and Advanced SIMD scalar instructions.
    FpScalar,
}

impl Family {
    /// Returns the human-readable name of the family.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sme => "SME",
            Self::Sve => "SVE",
            Self::PcRelAddressing => "PC-relative addressing",
            Self::AddSubImmWithTags => "add/subtract (immediate, with tags)",
            Self::MoveWideImm => "move wide (immediate)",
            Self::Bitfield => "bitfield",
            Self::Extract => "extract",
            Self::UnconditionalBranchImm => "unconditional branch (immediate)",
            Self::CompareAndBranch => "compare and branch",
            Self::TestAndBranch => "test and branch",
            Self::ConditionalBranchImm => "conditional branch (immediate)",
            Self::SystemAndBranchReg => "exception generation, system and branch (register)",
            Self::LoadStoreExclusiveAndStructures => "load/store exclusive and structures",
            Self::LoadLiteral => "load register (literal)",
            Self::LoadStorePair => "load/store pair",
            Self::LoadStoreRegister => "load/store register",
            Self::LogicalShiftedReg => "logical (shifted register)",
            Self::AddSubReg => "add/subtract (register)",
            Self::AddSubWithCarry => "add/subtract (with carry)",
            Self::FlagManipulation => "flag manipulation",
            Self::ConditionalCompare => "conditional compare",
            Self::ConditionalSelect => "conditional select",
            Self::DataProcessing1Or2Source => "data processing (1 or 2 source)",
            Self::DataProcessing3Source => "data processing (3 source)",
            Self::SimdVector => "Advanced SIMD (vector)",
            Self::FpScalar => "floating point (scalar)",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
