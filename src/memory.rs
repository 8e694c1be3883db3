//! # Host Memory Store
//!
//! The host owns the 64KB of backing storage. This module provides the
//! `MemoryBus` trait the CPU uses to reach that storage, and `FlatMemory`, a plain
//! 64KB array for hosts that have nothing more elaborate.
//!
//! The store is the bottom of the access path: the CPU's [`Bus`](crate::Bus) runs
//! soft switches first and only falls through to the store when none of them
//! intercepts the access.
//!
//! ## Design Principles
//!
//! - No bus errors: reads and writes to the store always succeed
//! - Values are bytes; range validation of wider host input happens at the CPU's
//!   host-facing accessors before anything reaches the store

/// Backing store the CPU reads and writes through.
///
/// # Examples
///
/// ```
/// use core6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use core6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0xC000],
///     rom: [u8; 0x4000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0xC000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0xC000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0xC000 {
///             self.ram[addr as usize] = value;
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Must never panic. Unmapped addresses may return any value.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Must never panic. Read-only or unmapped addresses may ignore the write.
    fn write(&mut self, addr: u16, value: u8);
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses map to a single contiguous array initialised to zero.
///
/// # Examples
///
/// ```
/// use core6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xC000, &[0xA2, 0x10]); // LDX #$10
///
/// let mut cpu = CPU::new(memory, false);
/// cpu.step().unwrap();
/// assert_eq!(cpu.x(), 0x10);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `start`, wrapping past 0xFFFF.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Returns the whole store as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_load_wraps_at_top_of_memory() {
        let mut mem = FlatMemory::new();
        mem.load(0xFFFE, &[0x01, 0x02, 0x03]);

        assert_eq!(mem.read(0xFFFE), 0x01);
        assert_eq!(mem.read(0xFFFF), 0x02);
        assert_eq!(mem.read(0x0000), 0x03);
    }

    #[test]
    fn test_as_slice_len() {
        assert_eq!(FlatMemory::new().as_slice().len(), 65536);
    }
}
