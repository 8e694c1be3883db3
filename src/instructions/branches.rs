//! # Branch Instructions
//!
//! This module implements the eight conditional branches. Each one tests a single
//! status flag against an expected value:
//!
//! | Instruction | Flag | Taken when |
//! |-------------|------|------------|
//! | BCC / BCS   | C    | clear / set |
//! | BNE / BEQ   | Z    | clear / set |
//! | BPL / BMI   | N    | clear / set |
//! | BVC / BVS   | V    | clear / set |
//!
//! All branch instructions use relative addressing with a signed 8-bit offset.
//! The offset byte is always consumed; PC only receives the target when the branch
//! is taken.

use crate::{AddressingMode, ExecutionError, MemoryBus, Status, CPU};

/// Executes a conditional branch on `flag`.
///
/// No flags are affected.
pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    flag: Status,
    expected: bool,
) -> Result<(), ExecutionError> {
    let target = cpu.effective_address(mode)?;

    if cpu.flag(flag) == expected {
        if let Some(target_pc) = target {
            cpu.pc = target_pc;
        }
    }

    Ok(())
}
