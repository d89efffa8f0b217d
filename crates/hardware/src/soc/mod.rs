//! Guest memory.
//!
//! Holds the process address space the loader builds and the fetch loop
//! reads instructions from.

/// Address space and memory regions.
pub mod memory;

/// The `MemoryAccess` trait.
pub mod traits;

pub use self::memory::{AddressSpace, Region};
pub use self::traits::MemoryAccess;
