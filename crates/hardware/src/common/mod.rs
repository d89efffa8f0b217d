//! Common utilities and types used throughout the emulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Bit Extraction:** `bit`, `field` and `truncate64to32` over instruction words.
//! 2. **Constants:** Instruction, page and register-file sizes.
//! 3. **Error Handling:** Decode outcomes, memory faults, loader and config errors.

/// Bit-field extraction over instruction words.
pub mod bits;

/// Common constants used throughout the emulator.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{
    ConfigError, ExecError, ExecResult, LoadError, MemoryError, SimError, UndefinedReason,
};
