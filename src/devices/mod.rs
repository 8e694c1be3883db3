//! Soft switch support for the 6502 core.
//!
//! A soft switch is a handler registered against an address range that gets first
//! look at every CPU access inside that range. It can supply the value of a read,
//! swallow a write, or simply observe the access and let it fall through to the
//! host's store.
//!
//! # Resolution
//!
//! - Handlers whose range contains the address run in registration order
//! - Every matching handler runs, even after one has produced a result
//! - The last handler to return a defined result wins
//! - With no defined result the access reaches the backing store
//!
//! # Example
//!
//! ```rust
//! use core6502::{CPU, FlatMemory, MemoryBus};
//! use core6502::devices::Callback;
//!
//! let mut cpu = CPU::new(FlatMemory::new(), false);
//!
//! // Keyboard data register: reads of $C000 return the last key
//! cpu.add_soft_switch(
//!     "keyboard",
//!     0xC000..=0xC000,
//!     Box::new(Callback(|_addr, value: Option<u8>| match value {
//!         None => Some(0xC1),
//!         Some(_) => None,
//!     })),
//! );
//!
//! assert_eq!(cpu.read_memory(0xC000), 0xC1);
//! ```

use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::rc::Rc;

use log::debug;

/// Interface for memory-mapped handlers that intercept CPU accesses.
///
/// Handlers receive the absolute address of the access. Both methods default to
/// "not intercepted", so a handler only implements the direction it cares about.
pub trait SoftSwitch {
    /// Called on every read inside the registered range.
    ///
    /// Returning `Some(value)` replaces the stored byte.
    fn read(&mut self, addr: u16) -> Option<u8> {
        let _ = addr;
        None
    }

    /// Called on every write inside the registered range.
    ///
    /// Returning `true` marks the write as handled; the store is not touched.
    fn write(&mut self, addr: u16, value: u8) -> bool {
        let _ = (addr, value);
        false
    }
}

/// Adapts a closure taking `(address, value)` into a soft switch.
///
/// Reads call the closure with `None`; writes call it with `Some(value)`. A
/// `Some` return intercepts the access (for writes the returned byte is ignored).
pub struct Callback<F>(pub F);

impl<F> SoftSwitch for Callback<F>
where
    F: FnMut(u16, Option<u8>) -> Option<u8>,
{
    fn read(&mut self, addr: u16) -> Option<u8> {
        (self.0)(addr, None)
    }

    fn write(&mut self, addr: u16, value: u8) -> bool {
        (self.0)(addr, Some(value)).is_some()
    }
}

/// Shared handlers let the host keep a handle to a device it also registered.
impl<T: SoftSwitch> SoftSwitch for Rc<RefCell<T>> {
    fn read(&mut self, addr: u16) -> Option<u8> {
        self.borrow_mut().read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) -> bool {
        self.borrow_mut().write(addr, value)
    }
}

struct SwitchMapping {
    owner: String,
    range: RangeInclusive<u16>,
    switch: Box<dyn SoftSwitch>,
}

/// Ordered registry of soft switches keyed by owner token and address range.
///
/// A per-page index lets accesses to pages without any handler skip the scan.
pub struct SoftSwitches {
    mappings: Vec<SwitchMapping>,
    pages: [bool; 256],
}

impl SoftSwitches {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            mappings: Vec::new(),
            pages: [false; 256],
        }
    }

    /// Register `switch` for every address in `range`, on behalf of `owner`.
    ///
    /// Handlers registered later win ties with handlers registered earlier. Pages
    /// the range touches are marked in the page index.
    ///
    /// # Arguments
    ///
    /// * `owner` - Token used by [`SoftSwitches::remove_owner`]
    /// * `range` - Inclusive address range
    /// * `switch` - The handler
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::SoftSwitches;
    /// use core6502::devices::Callback;
    ///
    /// let mut switches = SoftSwitches::new();
    /// switches.register(
    ///     "io",
    ///     0xC000..=0xC0FF,
    ///     Box::new(Callback(|_addr: u16, _value: Option<u8>| Some(0x7F))),
    /// );
    ///
    /// assert_eq!(switches.read(0xC010), Some(0x7F));
    /// assert_eq!(switches.read(0xC100), None);
    /// assert_eq!(switches.remove_owner("io"), 1);
    /// ```
    pub fn register(
        &mut self,
        owner: impl Into<String>,
        range: RangeInclusive<u16>,
        switch: Box<dyn SoftSwitch>,
    ) {
        let owner = owner.into();
        debug!(
            "soft switch registered: owner={} range=0x{:04X}-0x{:04X}",
            owner,
            range.start(),
            range.end()
        );
        self.mappings.push(SwitchMapping {
            owner,
            range,
            switch,
        });
        self.reindex();
    }

    /// Drop every handler registered by `owner`. Returns how many were removed.
    pub fn remove_owner(&mut self, owner: &str) -> usize {
        let before = self.mappings.len();
        self.mappings.retain(|m| m.owner != owner);
        self.reindex();
        before - self.mappings.len()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Owner tokens in registration order (one entry per handler).
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|m| m.owner.as_str())
    }

    /// Offer a read to every matching handler; the last defined value wins.
    pub fn read(&mut self, addr: u16) -> Option<u8> {
        if !self.pages[(addr >> 8) as usize] {
            return None;
        }

        let mut result = None;
        for mapping in self.mappings.iter_mut() {
            if mapping.range.contains(&addr) {
                if let Some(value) = mapping.switch.read(addr) {
                    result = Some(value);
                }
            }
        }
        result
    }

    /// Offer a write to every matching handler; returns whether any handled it.
    pub fn write(&mut self, addr: u16, value: u8) -> bool {
        if !self.pages[(addr >> 8) as usize] {
            return false;
        }

        let mut handled = false;
        for mapping in self.mappings.iter_mut() {
            if mapping.range.contains(&addr) && mapping.switch.write(addr, value) {
                handled = true;
            }
        }
        handled
    }

    fn reindex(&mut self) {
        self.pages = [false; 256];
        for mapping in &self.mappings {
            if mapping.range.is_empty() {
                continue;
            }
            let first = (*mapping.range.start() >> 8) as usize;
            let last = (*mapping.range.end() >> 8) as usize;
            for page in &mut self.pages[first..=last] {
                *page = true;
            }
        }
    }
}

impl Default for SoftSwitches {
    fn default() -> Self {
        Self::new()
    }
}
