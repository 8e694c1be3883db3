//! WebAssembly bindings for the 6502 core.
//!
//! This module provides JavaScript-callable interfaces to the CPU. Registers and
//! memory are addressed with hexadecimal strings here; everything below this layer
//! is numeric.

pub mod api;

pub use api::Emulator;
