//! Memory Region Buffer.
//!
//! A `Region` is one contiguous, zero-initialized block of guest memory at a
//! fixed base address, backed by a `Vec<u8>`. Address arithmetic is checked,
//! so a region that would wrap past the top of the address space cannot be
//! accessed out of bounds.

use std::collections::TryReserveError;
use std::ops::Range;

/// A contiguous block of guest memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    base: u64,
    bytes: Vec<u8>,
}

impl Region {
    /// Creates a zero-filled region of `size` bytes at `base`.
    ///
    /// # Arguments
    ///
    /// * `base` - Guest address of the first byte.
    /// * `size` - Length of the region in bytes.
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            bytes: vec![0; size],
        }
    }

    /// Like [`Region::new`], but reports a failed host allocation instead of
    /// aborting.
    pub fn try_new(base: u64, size: usize) -> Result<Self, TryReserveError> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(size)?;
        bytes.resize(size, 0);
        Ok(Self { base, bytes })
    }

    /// Creates a region holding `bytes` at `base`.
    pub fn from_bytes(base: u64, bytes: Vec<u8>) -> Self {
        Self { base, bytes }
    }

    /// Guest address of the first byte.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Length in bytes.
    pub const fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// One past the last address, saturating at `u64::MAX`.
    pub const fn end(&self) -> u64 {
        self.base.saturating_add(self.size())
    }

    /// Whether `[base, base + size)` shares any byte with this region.
    pub const fn overlaps(&self, base: u64, size: u64) -> bool {
        let end = base.saturating_add(size);
        size != 0 && self.size() != 0 && base < self.end() && self.base < end
    }

    /// Host index range of `[addr, addr + len)`, if it lies inside the region.
    fn range(&self, addr: u64, len: usize) -> Option<Range<usize>> {
        let offset = usize::try_from(addr.checked_sub(self.base)?).ok()?;
        let end = offset.checked_add(len)?;
        (end <= self.bytes.len()).then_some(offset..end)
    }

    /// The bytes `[addr, addr + len)`, if they lie inside the region.
    pub fn slice(&self, addr: u64, len: usize) -> Option<&[u8]> {
        let range = self.range(addr, len)?;
        self.bytes.get(range)
    }

    /// Mutable view of `[addr, addr + len)`, if it lies inside the region.
    pub fn slice_mut(&mut self, addr: u64, len: usize) -> Option<&mut [u8]> {
        let range = self.range(addr, len)?;
        self.bytes.get_mut(range)
    }

    /// The whole region.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
