//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address
//! - JSR / RTS: Subroutine call and return
//! - BRK / RTI: Software interrupt and return from interrupt
//!
//! BRK is a software interrupt that:
//! 1. Sets the I and B flags
//! 2. Pushes PC+1 to the stack (high byte first, then low byte)
//! 3. Pushes the processor status
//! 4. Loads PC from IRQ vector at $FFFE/F

use crate::cpu::IRQ_VECTOR;
use crate::{AddressingMode, ExecutionError, MemoryBus, Status, CPU};

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234 - Jump to address $1234
/// - Indirect (0x6C): JMP ($1234) - Jump to address stored at $1234/$1235
///
/// In compatibility mode the indirect form reproduces the NMOS page-wrap bug:
/// JMP ($10FF) reads its high byte from $1000, not $1100.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    if let Some(target) = cpu.effective_address(mode)? {
        cpu.pc = target;
    }
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last operand byte, then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let Some(target) = cpu.effective_address(mode)? else {
        return Ok(());
    };

    // PC is past both operand bytes here
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.pc = target;
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.pc = cpu.pop_word().wrapping_add(1);
    Ok(())
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// The pushed return address skips the padding byte after the opcode. The pushed
/// status byte carries the B flag, which stays set in the live register as well.
///
/// Cycle timing: 7 cycles (fixed)
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.status.insert(Status::INTERRUPT | Status::BREAK);

    let return_address = cpu.pc.wrapping_add(1);
    cpu.push_word(return_address);
    cpu.push(cpu.status.bits());

    cpu.pc = cpu.read_word(IRQ_VECTOR);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Status is restored verbatim; the return address is used as-is, without the
/// +1 adjustment RTS applies.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let status = cpu.pop();
    cpu.status = Status::from_bits_retain(status);
    cpu.pc = cpu.pop_word();
    Ok(())
}
