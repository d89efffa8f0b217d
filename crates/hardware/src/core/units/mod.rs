//! Execution units.
//!
//! Stateless functional units used by the instruction handlers. Only the
//! integer ALU exists today; load/store and branch units will sit beside it.

/// Integer arithmetic and logic unit.
pub mod alu;
