//! # Increment and Decrement Instructions
//!
//! - INC / DEC: Read-modify-write on memory through the bus
//! - INX / INY / DEX / DEY: Index register variants
//!
//! All wrap modulo 256 and update Z and N from the result.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the INC (Increment Memory) instruction.
///
/// Adds one to the byte at the effective address, wrapping 0xFF to 0x00, and
/// writes it back through the bus. Updates Z and N flags.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `mode` - Addressing mode of this INC opcode
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    modify_memory(cpu, mode, |value| value.wrapping_add(1))
}

/// Executes the DEC (Decrement Memory) instruction.
///
/// Subtracts one from the value held at a specified memory location,
/// wrapping 0x00 to 0xFF. Updates Z and N flags.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `mode` - Addressing mode of this DEC opcode
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    modify_memory(cpu, mode, |value| value.wrapping_sub(1))
}

fn modify_memory<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    op: impl FnOnce(u8) -> u8,
) -> Result<(), ExecutionError> {
    if let Some(addr) = cpu.effective_address(mode)? {
        let result = op(cpu.bus.read(addr));
        cpu.bus.write(addr, result);
        cpu.update_zero_and_negative(result);
    }
    Ok(())
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zero_and_negative(cpu.x);
    Ok(())
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zero_and_negative(cpu.y);
    Ok(())
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zero_and_negative(cpu.x);
    Ok(())
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zero_and_negative(cpu.y);
    Ok(())
}
