//! Memory access trait.
//!
//! This module defines `MemoryAccess`, the only way the emulator touches guest
//! memory. It provides:
//! 1. **Block access:** `read_bytes` and `write_bytes`, which implementors supply.
//! 2. **Scalar access:** Byte, half, word and doubleword helpers, little-endian.
//!
//! Every access is bounds-checked and reports a `MemoryError` instead of panicking.

use crate::common::MemoryError;

/// Byte-addressable guest memory.
pub trait MemoryAccess {
    /// Fills `buf` with the bytes starting at `addr`.
    fn read_bytes(&self, addr: u64, buf: &mut [u8]) -> Result<(), MemoryError>;

    /// Writes `data` starting at `addr`.
    fn write_bytes(&mut self, addr: u64, data: &[u8]) -> Result<(), MemoryError>;

    /// Reads one byte.
    fn read_u8(&self, addr: u64) -> Result<u8, MemoryError> {
        let mut buf = [0u8; 1];
        self.read_bytes(addr, &mut buf)?;
        Ok(buf[0])
    }

    /// Reads two bytes (little-endian).
    fn read_u16(&self, addr: u64) -> Result<u16, MemoryError> {
        let mut buf = [0u8; 2];
        self.read_bytes(addr, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Reads four bytes (little-endian).
    fn read_u32(&self, addr: u64) -> Result<u32, MemoryError> {
        let mut buf = [0u8; 4];
        self.read_bytes(addr, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Reads eight bytes (little-endian).
    fn read_u64(&self, addr: u64) -> Result<u64, MemoryError> {
        let mut buf = [0u8; 8];
        self.read_bytes(addr, &mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Writes one byte.
    fn write_u8(&mut self, addr: u64, val: u8) -> Result<(), MemoryError> {
        self.write_bytes(addr, &[val])
    }

    /// Writes two bytes (little-endian).
    fn write_u16(&mut self, addr: u64, val: u16) -> Result<(), MemoryError> {
        self.write_bytes(addr, &val.to_le_bytes())
    }

    /// Writes four bytes (little-endian).
    fn write_u32(&mut self, addr: u64, val: u32) -> Result<(), MemoryError> {
        self.write_bytes(addr, &val.to_le_bytes())
    }

    /// Writes eight bytes (little-endian).
    fn write_u64(&mut self, addr: u64, val: u64) -> Result<(), MemoryError> {
        self.write_bytes(addr, &val.to_le_bytes())
    }
}
