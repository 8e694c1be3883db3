//! # Load and Store Instructions
//!
//! This module implements register loads and stores:
//! - LDA / LDX / LDY: Load a register through the bus, update Z and N
//! - STA / STX / STY: Store a register through the bus, no flags affected

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.read_operand(mode)?;
    cpu.update_zero_and_negative(cpu.a);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.read_operand(mode)?;
    cpu.update_zero_and_negative(cpu.x);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.read_operand(mode)?;
    cpu.update_zero_and_negative(cpu.y);
    Ok(())
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.a;
    store(cpu, mode, value)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.x;
    store(cpu, mode, value)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.y;
    store(cpu, mode, value)
}

fn store<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    value: u8,
) -> Result<(), ExecutionError> {
    if let Some(addr) = cpu.effective_address(mode)? {
        cpu.bus.write(addr, value);
    }
    Ok(())
}
