//! # Register Transfer Instructions
//!
//! This module implements register-to-register copies:
//! - TAX, TAY, TXA, TYA: Copy between A and the index registers, update Z and N
//! - TSX: Copy SP into X, update Z and N
//! - TXS: Copy X into SP, no flags affected

use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.x = cpu.a;
    cpu.update_zero_and_negative(cpu.x);
    Ok(())
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.y = cpu.a;
    cpu.update_zero_and_negative(cpu.y);
    Ok(())
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.a = cpu.x;
    cpu.update_zero_and_negative(cpu.a);
    Ok(())
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.a = cpu.y;
    cpu.update_zero_and_negative(cpu.a);
    Ok(())
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.x = cpu.sp;
    cpu.update_zero_and_negative(cpu.x);
    Ok(())
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.sp = cpu.x;
    Ok(())
}
