//! AArch64 Exception Levels.
//!
//! This module defines the privilege levels that bank `SP_ELx` and `ELR_ELx`.
//! It implements the following:
//! 1. **Level Classification:** EL0 (applications) through EL3 (secure monitor).
//! 2. **Banking:** Conversion to the index of the banked register arrays.
//! 3. **Observability:** Human-readable naming and display formatting.
//!
//! The emulator runs user-mode programs, so execution stays at EL0; the other
//! levels exist so the banked state is modelled faithfully.

/// AArch64 exception level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExceptionLevel {
    /// EL0: unprivileged application code.
    #[default]
    El0 = 0,
    /// EL1: operating system kernel.
    El1 = 1,
    /// EL2: hypervisor.
    El2 = 2,
    /// EL3: secure monitor.
    El3 = 3,
}

impl ExceptionLevel {
    /// Index of this level in the banked `sp_el` / `elr_el` arrays.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the architectural name of the level.
    pub const fn name(self) -> &'static str {
        match self {
            Self::El0 => "EL0",
            Self::El1 => "EL1",
            Self::El2 => "EL2",
            Self::El3 => "EL3",
        }
    }
}

impl std::fmt::Display for ExceptionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
