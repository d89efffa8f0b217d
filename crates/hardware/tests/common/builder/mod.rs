//! Builders for test inputs.


/// A64 instruction encoders.
pub mod instruction;
