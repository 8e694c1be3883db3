//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each force one flag and touch nothing else.
//! There is no SEV on the 6502.

use crate::{ExecutionError, MemoryBus, Status, CPU};

/// Executes one of the flag set/clear instructions.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `flag` - The status bit the opcode controls
/// * `value` - `true` for SEC/SEI/SED, `false` for the CLx forms
pub(crate) fn execute_flag<M: MemoryBus>(
    cpu: &mut CPU<M>,
    flag: Status,
    value: bool,
) -> Result<(), ExecutionError> {
    cpu.set_flag(flag, value);
    Ok(())
}
