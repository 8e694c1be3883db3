//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR operate either on the accumulator or, for the memory
//! forms, read-modify-write through the bus. The bit shifted out lands in C; the
//! rotates feed the previous C into the vacated bit. Z and N follow the result.

use crate::{AddressingMode, ExecutionError, MemoryBus, ShiftDirection, Status, CPU};

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    shift(cpu, mode, ShiftDirection::Left, false)
}

/// Executes the LSR (Logical Shift Right) instruction.
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    shift(cpu, mode, ShiftDirection::Right, false)
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    shift(cpu, mode, ShiftDirection::Left, true)
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    shift(cpu, mode, ShiftDirection::Right, true)
}

/// Shifts A or memory one bit in `direction`.
///
/// With `rotate` set the previous carry fills the vacated bit; otherwise it is
/// cleared. Either way the bit shifted out becomes the new carry.
fn shift<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    direction: ShiftDirection,
    rotate: bool,
) -> Result<(), ExecutionError> {
    let carry_in = rotate && cpu.flag_c();
    let op = |value: u8| direction.shift(value, carry_in);

    let result = match cpu.effective_address(mode)? {
        Some(addr) => {
            let (result, carry_out) = op(cpu.bus.read(addr));
            cpu.bus.write(addr, result);
            cpu.set_flag(Status::CARRY, carry_out);
            result
        }
        None => {
            let (result, carry_out) = op(cpu.a);
            cpu.a = result;
            cpu.set_flag(Status::CARRY, carry_out);
            result
        }
    };

    cpu.update_zero_and_negative(result);
    Ok(())
}
