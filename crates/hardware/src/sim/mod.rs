//! Process loading and execution.
//!
//! The loader builds the initial image from an ELF file; the simulator drives
//! the fetch-execute loop over it.

/// Static ELF loader.
pub mod loader;

/// Fetch-execute loop.
pub mod simulator;

pub use self::loader::{LoadedImage, load_elf, load_elf_file};
pub use self::simulator::{Emulator, RunSummary, StopReason};
