//! AArch64 architectural state components.
//!
//! This module contains the pieces the register file is assembled from:
//! 1. **GPRs:** `x0`-`x30` storage.
//! 2. **Modes:** Exception levels used to select banked registers.
//! 3. **PSTATE:** The N, Z, C, V and Q condition flags.

/// General-Purpose Register file implementation.
pub mod gpr;

/// Exception level definitions.
pub mod mode;

/// Condition flags.
pub mod pstate;
