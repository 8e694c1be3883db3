//! # CPU Bus
//!
//! Every read and write the CPU performs funnels through [`Bus`]. The bus owns no
//! storage of its own: it pairs the host's store with the registered soft switches
//! and applies the interception rules before the store is touched.

use crate::devices::{SoftSwitch, SoftSwitches};
use crate::MemoryBus;
use std::ops::RangeInclusive;

/// Host store plus soft switch chain.
///
/// # Examples
///
/// ```
/// use core6502::{Bus, FlatMemory, MemoryBus};
///
/// let mut bus = Bus::new(FlatMemory::new());
/// bus.write_word(0xFFFE, 0x1234);
///
/// assert_eq!(bus.store().read(0xFFFE), 0x34);
/// assert_eq!(bus.store().read(0xFFFF), 0x12);
/// assert_eq!(bus.read_word(0xFFFE), 0x1234);
/// ```
pub struct Bus<M: MemoryBus> {
    store: M,
    switches: SoftSwitches,
}

impl<M: MemoryBus> Bus<M> {
    pub fn new(store: M) -> Self {
        Self {
            store,
            switches: SoftSwitches::new(),
        }
    }

    /// Reads a byte. A soft switch result replaces the stored byte entirely.
    pub fn read(&mut self, addr: u16) -> u8 {
        match self.switches.read(addr) {
            Some(value) => value,
            None => self.store.read(addr),
        }
    }

    /// Writes a byte unless a soft switch intercepts it.
    pub fn write(&mut self, addr: u16, value: u8) {
        if !self.switches.write(addr, value) {
            self.store.write(addr, value);
        }
    }

    /// Reads a little-endian word: low byte at `addr`, high byte at `addr + 1`.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Writes a word as two independently intercepted byte writes, low byte first.
    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.write(addr, (value & 0xFF) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    pub fn add_soft_switch(
        &mut self,
        owner: impl Into<String>,
        range: RangeInclusive<u16>,
        switch: Box<dyn SoftSwitch>,
    ) {
        self.switches.register(owner, range, switch);
    }

    pub fn remove_soft_switches(&mut self, owner: &str) -> usize {
        self.switches.remove_owner(owner)
    }

    pub fn soft_switches(&self) -> &SoftSwitches {
        &self.switches
    }

    /// The host store, bypassing soft switches.
    pub fn store(&self) -> &M {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut M {
        &mut self.store
    }

    pub fn into_store(self) -> M {
        self.store
    }
}
