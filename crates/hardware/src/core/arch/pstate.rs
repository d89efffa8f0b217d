//! Condition flags (the NZCV/Q part of PSTATE).
//!
//! Flags are plain named booleans; nothing depends on an in-memory bit layout.
//! They change only when a flag-setting instruction commits an [`Nzcv`]
//! result, and are never cleared implicitly between instructions.

use std::fmt;

/// The four arithmetic condition flags produced by the ALU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Nzcv {
    /// Negative: the result's sign bit.
    pub n: bool,
    /// Zero: the result is zero.
    pub z: bool,
    /// Carry: unsigned overflow (or "no borrow" for subtraction).
    pub c: bool,
    /// Overflow: signed overflow.
    pub v: bool,
}

impl Nzcv {
    /// Packs the flags into bits `[31:28]` the way `MRS NZCV` reports them.
    pub const fn to_bits(self) -> u32 {
        (self.n as u32) << 31
            | (self.z as u32) << 30
            | (self.c as u32) << 29
            | (self.v as u32) << 28
    }
}

/// Condition flags register of one CPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    /// Negative.
    pub n: bool,
    /// Zero.
    pub z: bool,
    /// Carry.
    pub c: bool,
    /// Overflow.
    pub v: bool,
    /// Cumulative saturation. Untouched by integer data processing.
    pub q: bool,
}

impl Flags {
    /// Commits an ALU flag result; `q` keeps its value.
    #[inline]
    pub const fn set_nzcv(&mut self, nzcv: Nzcv) {
        self.n = nzcv.n;
        self.z = nzcv.z;
        self.c = nzcv.c;
        self.v = nzcv.v;
    }

    /// Returns the current N, Z, C and V flags.
    #[inline]
    pub const fn nzcv(&self) -> Nzcv {
        Nzcv {
            n: self.n,
            z: self.z,
            c: self.c,
            v: self.v,
        }
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, name: char| if set { name } else { '-' };
        write!(
            f,
            "{}{}{}{}{}",
            flag(self.n, 'N'),
            flag(self.z, 'Z'),
            flag(self.c, 'C'),
            flag(self.v, 'V'),
            flag(self.q, 'Q')
        )
    }
}
