//! Guest Address Space.
//!
//! This module models the memory image of the emulated process. It provides:
//! 1. **Regions:** Zero-initialized byte buffers at fixed guest addresses.
//! 2. **Mapping:** An `AddressSpace` holding non-overlapping regions.
//! 3. **Access:** A `MemoryAccess` implementation where every access must lie
//!    entirely inside one region.
//!
//! The loader owns construction; after that the address space is handed to the
//! fetch loop, which is the only code that reads or writes it.

/// Contiguous memory region backed by a host buffer.
pub mod buffer;

use tracing::debug;

pub use self::buffer::Region;
use crate::common::MemoryError;
use crate::soc::traits::MemoryAccess;

/// The set of mapped regions of one process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressSpace {
    regions: Vec<Region>,
}

impl AddressSpace {
    /// Creates an empty address space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `region`, failing if it overlaps an existing one.
    pub fn map(&mut self, region: Region) -> Result<(), MemoryError> {
        let (base, size) = (region.base(), region.size());
        if self.regions.iter().any(|r| r.overlaps(base, size)) {
            return Err(MemoryError::Overlap { base, size });
        }
        debug!(size, "mapped region at {base:#x}");
        self.regions.push(region);
        Ok(())
    }

    /// The mapped regions, in mapping order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The region containing `addr`, if any.
    pub fn region_at(&self, addr: u64) -> Option<&Region> {
        self.regions.iter().find(|r| r.overlaps(addr, 1))
    }

    const fn unmapped(addr: u64, len: usize) -> MemoryError {
        MemoryError::Unmapped {
            addr,
            len: len as u64,
        }
    }
}

impl MemoryAccess for AddressSpace {
    fn read_bytes(&self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryError> {
        let src = self
            .regions
            .iter()
            .find_map(|r| r.slice(addr, buf.len()))
            .ok_or(Self::unmapped(addr, buf.len()))?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryError> {
        let dst = self
            .regions
            .iter_mut()
            .find_map(|r| r.slice_mut(addr, data.len()))
            .ok_or(Self::unmapped(addr, data.len()))?;
        dst.copy_from_slice(data);
        Ok(())
    }
}
