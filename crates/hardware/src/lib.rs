//! AArch64 user-mode emulator library.
//!
//! This crate loads statically linked AArch64 ELF executables and interprets
//! them on a functional CPU model:
//! 1. **Core:** Register file, condition flags and the integer ALU.
//! 2. **ISA:** Table-driven A64 decode tree with exact data-processing (immediate) semantics.
//! 3. **Memory:** A bounds-checked guest address space.
//! 4. **Simulation:** ELF loader, configuration and the fetch-execute loop.

/// Common types and constants (bit extraction, errors, sizes).
pub mod common;
/// Emulator configuration (stack layout, tracing, step limit).
pub mod config;
/// CPU core (register file, execution entry point, ALU).
pub mod core;
/// Instruction set (classes, field extraction, decode tree).
pub mod isa;
/// ELF loader and fetch-execute loop.
pub mod sim;
/// Guest memory (address space, regions, access trait).
pub mod soc;

/// Root configuration type; use `Config::default()` or load JSON.
pub use crate::config::Config;
/// CPU architectural state.
pub use crate::core::Cpu;
/// Emulator driving one CPU over a loaded image.
pub use crate::sim::Emulator;
