//! A64 Instruction Set.
//!
//! Contains the encoding vocabulary and the decode dispatch tree.
//!
//! # Modules
//!
//! * `encoding`: Instruction classes and families.
//! * `instruction`: Operand field accessors on raw words.
//! * `decode`: The table-driven dispatch tree and leaf handlers.

/// Decode dispatch tree and instruction handlers.
pub mod decode;

/// Instruction classes and families.
pub mod encoding;

/// Operand field extraction from instruction words.
pub mod instruction;
