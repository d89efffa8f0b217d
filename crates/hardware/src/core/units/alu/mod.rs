//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the data-processing
//! handlers. It is stateless: every operation takes operands and a width and
//! returns a value and, for flag-setting forms, the flags to commit.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: `AddWithCarry` (ADD, SUB, ADDS, SUBS)
//! - [`logic`]:      AND, ORR, EOR, ANDS and logical-immediate bitmasks

/// Integer addition and subtraction with exact flag computation.
pub mod arithmetic;

/// Bitwise logical operations and bitmask immediates.
pub mod logic;

use crate::core::arch::pstate::Nzcv;

/// Operand width of a data-processing instruction, selected by `sf`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegWidth {
    /// 32-bit W-register form (`sf = 0`).
    W32,
    /// 64-bit X-register form (`sf = 1`).
    X64,
}

impl RegWidth {
    /// Width selected by the `sf` bit.
    #[inline(always)]
    pub const fn from_sf(sf: bool) -> Self {
        if sf { Self::X64 } else { Self::W32 }
    }

    /// Number of bits.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        match self {
            Self::W32 => 32,
            Self::X64 => 64,
        }
    }

    /// Mask of the valid bits.
    #[inline(always)]
    pub const fn mask(self) -> u64 {
        match self {
            Self::W32 => 0xFFFF_FFFF,
            Self::X64 => u64::MAX,
        }
    }

    /// The sign bit at this width.
    #[inline(always)]
    pub const fn sign_bit(self) -> u64 {
        1u64 << (self.bits() - 1)
    }

    /// Sign-extends the low `bits()` of `val` to 64 bits.
    #[inline(always)]
    pub const fn sign_extend(self, val: u64) -> i64 {
        match self {
            Self::W32 => val as u32 as i32 as i64,
            Self::X64 => val as i64,
        }
    }
}

/// Integer ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `a + b`.
    Add,
    /// `a + b`, setting flags.
    Adds,
    /// `a - b`.
    Sub,
    /// `a - b`, setting flags.
    Subs,
    /// `a & b`.
    And,
    /// `a & b`, setting flags.
    Ands,
    /// `a | b`.
    Orr,
    /// `a ^ b`.
    Eor,
}

impl AluOp {
    /// Whether the operation commits condition flags.
    pub const fn sets_flags(self) -> bool {
        matches!(self, Self::Adds | Self::Subs | Self::Ands)
    }
}

/// Result of one ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluResult {
    /// The result, zero-extended from the operation width.
    pub value: u64,
    /// Flags to commit; `Some` exactly for flag-setting operations.
    pub flags: Option<Nzcv>,
}

/// Arithmetic Logic Unit for integer data processing.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op`    - The ALU operation to perform
    /// * `a`     - First operand
    /// * `b`     - Second operand
    /// * `width` - Operation width; operands are truncated to it
    ///
    /// # Examples
    ///
    /// ```
    /// use a64emu_core::core::units::alu::{Alu, AluOp, RegWidth};
    ///
    /// let r = Alu::execute(AluOp::Subs, 5, 5, RegWidth::X64);
    /// assert_eq!(r.value, 0);
    /// let flags = r.flags.unwrap();
    /// assert!(flags.z && flags.c);
    ///
    /// // W-forms wrap at 32 bits and never leak into the upper half
    /// let r = Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1, RegWidth::W32);
    /// assert_eq!(r.value, 0);
    /// ```
    pub const fn execute(op: AluOp, a: u64, b: u64, width: RegWidth) -> AluResult {
        use arithmetic::{add_no_flags_sized, add_with_carry_sized};
        use logic::LogicOp;

        match op {
            AluOp::Add => AluResult {
                value: add_no_flags_sized(a, b, false, width),
                flags: None,
            },
            AluOp::Sub => AluResult {
                value: add_no_flags_sized(a, !b, true, width),
                flags: None,
            },
            AluOp::Adds => {
                let (value, nzcv) = add_with_carry_sized(a, b, false, width);
                AluResult {
                    value,
                    flags: Some(nzcv),
                }
            }
            AluOp::Subs => {
                let (value, nzcv) = add_with_carry_sized(a, !b, true, width);
                AluResult {
                    value,
                    flags: Some(nzcv),
                }
            }
            AluOp::And => AluResult {
                value: logic::execute(LogicOp::And, a, b, width),
                flags: None,
            },
            AluOp::Ands => {
                let value = logic::execute(LogicOp::And, a, b, width);
                AluResult {
                    value,
                    flags: Some(logic::logic_flags(value, width)),
                }
            }
            AluOp::Orr => AluResult {
                value: logic::execute(LogicOp::Orr, a, b, width),
                flags: None,
            },
            AluOp::Eor => AluResult {
                value: logic::execute(LogicOp::Eor, a, b, width),
                flags: None,
            },
        }
    }
}
