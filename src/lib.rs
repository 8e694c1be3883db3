//! # 6502 Instruction Execution Core
//!
//! An NMOS 6502 interpreter designed to sit underneath a host machine emulator,
//! debugger, or test harness. The host owns the memory store, drives the clock, and
//! can intercept individual addresses ("soft switches") for memory-mapped I/O.
//!
//! This crate provides the CPU state, the 256-entry dispatch table, the addressing
//! mode resolvers, the ALU (including decimal mode), and the stack and control-flow
//! operations. Every memory access the CPU makes goes through the [`Bus`], which
//! consults registered soft switches before touching the host's store.
//!
//! ## Quick Start
//!
//! ```rust
//! use core6502::{CPU, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // LDA #$FF at the power-on program counter
//! memory.write(0xC000, 0xA9);
//! memory.write(0xC001, 0xFF);
//!
//! let mut cpu = CPU::new(memory, false);
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.a(), 0xFF);
//! assert!(cpu.flag_n());
//! assert_eq!(cpu.cycles(), 2);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, host-facing accessors and the execution loop
//! - `status` - Status register model
//! - `memory` - `MemoryBus` trait for host stores and `FlatMemory`
//! - `bus` - The bus the CPU reads and writes through
//! - `devices` - Soft switch trait and registry
//! - `opcodes` - Dispatch table
//! - `addressing` - Addressing modes and effective address resolution
//! - `config` - CPU configuration
//! - `hex` - Parsing helpers for string-typed host boundaries

pub mod addressing;
pub mod bus;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod hex;
pub mod memory;
pub mod opcodes;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use bus::Bus;
pub use config::{CpuConfig, ZeroPagePolicy};
pub use cpu::{Register, StackEntry, CPU};
pub use devices::{SoftSwitch, SoftSwitches};
pub use hex::ShiftDirection;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Instruction, Operation, OPCODE_TABLE};
pub use status::{Status, StatusFlags};

/// Errors that can occur during CPU execution or at the host-facing accessors.
///
/// Every variant is fatal to the instruction (or host call) that raised it. The
/// core never retries; recovery policy belongs to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// No dispatch entry exists for the fetched byte.
    UnknownOpcode {
        /// The opcode byte
        opcode: u8,
        /// Address the opcode was fetched from
        pc: u16,
    },

    /// A zero-page computation produced an address outside 0x00-0xFF.
    AddressRangeViolation {
        /// The unwrapped effective address
        address: u16,
        /// Program counter when the violation was detected
        pc: u16,
    },

    /// A host write supplied a value that does not fit the target width.
    InvalidWrite {
        /// Target address
        address: u16,
        /// Offending value
        value: i32,
        /// Program counter at the time of the write
        pc: u16,
    },

    /// A shift direction other than "left" or "right" was supplied.
    InvalidShiftDirection(String),

    /// A value outside 0-99 was given to the BCD encoder.
    InvalidBcdValue(i32),

    /// A malformed or out-of-range numeric argument reached a helper.
    InvalidNumericInput(String),
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UnknownOpcode { opcode, pc } => {
                write!(f, "Found undefined opcode 0x{:02X} at 0x{:04X}", opcode, pc)
            }
            ExecutionError::AddressRangeViolation { address, pc } => {
                write!(
                    f,
                    "Zero page boundary exceeded: address 0x{:04X} at 0x{:04X}",
                    address, pc
                )
            }
            ExecutionError::InvalidWrite { address, value, pc } => {
                if *value < 0 {
                    write!(
                        f,
                        "At 0x{:04X} tried to write a negative number ({}) to memory (0x{:04X})",
                        pc, value, address
                    )
                } else {
                    write!(
                        f,
                        "At 0x{:04X} tried to write 0x{:X} to memory (0x{:04X}), value too wide",
                        pc, value, address
                    )
                }
            }
            ExecutionError::InvalidShiftDirection(direction) => {
                write!(f, "Invalid shift direction \"{}\"", direction)
            }
            ExecutionError::InvalidBcdValue(value) => {
                write!(f, "Bad BCD value {}", value)
            }
            ExecutionError::InvalidNumericInput(input) => {
                write!(f, "Invalid numeric input \"{}\"", input)
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
