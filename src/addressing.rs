//! # Addressing Modes
//!
//! This module defines the 13 addressing modes of the 6502 and the resolvers that
//! turn the operand bytes following an opcode into an effective address.
//!
//! Every resolver starts with PC pointing at the first operand byte and leaves it
//! pointing at the next instruction. Indirect lookups read through the bus, so soft
//! switches see pointer fetches the same way they see data accesses.

use crate::config::ZeroPagePolicy;
use crate::{ExecutionError, MemoryBus, CPU};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions, relative to the next instruction.
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// In compatibility mode, `JMP ($10FF)` takes its high byte from $1000.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Converts a relative-branch operand to its signed offset.
pub(crate) fn branch_offset(operand: u8) -> i16 {
    operand as i8 as i16
}

impl<M: MemoryBus> CPU<M> {
    /// Reads the byte at PC and advances PC by one.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads the little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let value = self.bus.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    /// Resolves the effective address for `mode`, consuming its operand bytes.
    ///
    /// Returns `None` for implicit and accumulator modes, which have no address.
    /// For immediate mode the address is that of the operand byte itself.
    pub(crate) fn effective_address(
        &mut self,
        mode: AddressingMode,
    ) -> Result<Option<u16>, ExecutionError> {
        let address = match mode {
            AddressingMode::Implicit | AddressingMode::Accumulator => return Ok(None),
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            AddressingMode::ZeroPage => self.zero_page_indexed(0)?,
            AddressingMode::ZeroPageX => self.zero_page_indexed(self.x)?,
            AddressingMode::ZeroPageY => self.zero_page_indexed(self.y)?,
            AddressingMode::Relative => {
                let offset = branch_offset(self.fetch_byte());
                self.pc.wrapping_add_signed(offset)
            }
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::AbsoluteX => self.fetch_word().wrapping_add(self.x as u16),
            AddressingMode::AbsoluteY => self.fetch_word().wrapping_add(self.y as u16),
            AddressingMode::Indirect => {
                let ptr = self.fetch_word();
                if self.config.compatibility && ptr & 0x00FF == 0x00FF {
                    // NMOS bug: the high byte comes from the start of the same page
                    let lo = self.bus.read(ptr) as u16;
                    let hi = self.bus.read(ptr & 0xFF00) as u16;
                    (hi << 8) | lo
                } else {
                    self.bus.read_word(ptr)
                }
            }
            AddressingMode::IndirectX => {
                let ptr = self.fetch_byte().wrapping_add(self.x);
                self.read_zero_page_pointer(ptr)
            }
            AddressingMode::IndirectY => {
                let ptr = self.fetch_byte();
                let base = self.read_zero_page_pointer(ptr);
                let mut lo = (base & 0x00FF) + self.y as u16;
                let mut hi = base >> 8;
                if lo > 0xFF {
                    lo &= 0xFF;
                    hi += 1;
                }
                (hi << 8).wrapping_add(lo)
            }
        };
        Ok(Some(address))
    }

    /// Reads the operand for `mode`: the byte at the effective address, or the
    /// accumulator for accumulator mode.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> Result<u8, ExecutionError> {
        match self.effective_address(mode)? {
            Some(addr) => Ok(self.bus.read(addr)),
            None => Ok(self.a),
        }
    }

    fn zero_page_indexed(&mut self, index: u8) -> Result<u16, ExecutionError> {
        let address = self.fetch_byte() as u16 + index as u16;
        if address > 0xFF {
            match self.config.zero_page_policy {
                ZeroPagePolicy::Fault => {
                    log::warn!(
                        "zero page boundary exceeded: 0x{:04X} at 0x{:04X}",
                        address,
                        self.current_pc
                    );
                    return Err(ExecutionError::AddressRangeViolation {
                        address,
                        pc: self.current_pc,
                    });
                }
                ZeroPagePolicy::Wrap => return Ok(address & 0xFF),
            }
        }
        Ok(address)
    }

    /// Reads a 16-bit pointer stored in the zero page.
    ///
    /// Under the wrapping policy the high byte of a pointer at $FF comes from $00;
    /// otherwise it is read from $0100.
    fn read_zero_page_pointer(&mut self, ptr: u8) -> u16 {
        let hi_addr = match self.config.zero_page_policy {
            ZeroPagePolicy::Fault => ptr as u16 + 1,
            ZeroPagePolicy::Wrap => ptr.wrapping_add(1) as u16,
        };
        let lo = self.bus.read(ptr as u16) as u16;
        let hi = self.bus.read(hi_addr) as u16;
        (hi << 8) | lo
    }
}
