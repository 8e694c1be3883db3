//! # Stack Instructions
//!
//! PHA and PHP push without touching flags. PLA updates Z and N from the pulled
//! byte; PLP replaces the whole status register with it.

use crate::{ExecutionError, MemoryBus, Status, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.push(cpu.a);
    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.push(cpu.status.bits());
    Ok(())
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.a = cpu.pop();
    cpu.update_zero_and_negative(cpu.a);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let status = cpu.pop();
    cpu.status = Status::from_bits_retain(status);
    Ok(())
}
