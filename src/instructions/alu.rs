//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC / SBC: Add and subtract with carry, binary or decimal per the D flag
//! - AND / ORA / EOR: Bitwise logic against the accumulator
//! - CMP / CPX / CPY: Register compares
//! - BIT: Bit test

use crate::{AddressingMode, ExecutionError, MemoryBus, Status, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. With the D flag set the
/// operands are treated as packed BCD.
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode)?;
    if cpu.flag_d() {
        add_decimal(cpu, value);
    } else {
        add_binary(cpu, value);
    }
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// The 6502 subtracts by adding the one's complement of the operand; the carry
/// flag acts as an inverted borrow.
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode)?;
    if cpu.flag_d() {
        subtract_decimal(cpu, value);
    } else {
        add_binary(cpu, !value);
    }
    Ok(())
}

fn add_binary<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let carry_in = cpu.flag_c() as u16;

    let result16 = a as u16 + value as u16 + carry_in;
    let result = result16 as u8;

    // V = (A^result) & (M^result) & 0x80: both inputs share a sign the result lacks
    let overflow = ((a ^ result) & (value ^ result) & 0x80) != 0;

    cpu.set_flag(Status::CARRY, result16 > 0xFF);
    cpu.set_flag(Status::OVERFLOW, overflow);
    cpu.update_zero_and_negative(result);
    cpu.a = result;
}

fn add_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let carry_in = cpu.flag_c() as u16;

    let mut al = (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry_in;
    let mut ah = (a & 0xF0) as u16 + (value & 0xF0) as u16;
    if al > 0x09 {
        al += 0x06;
        ah += 0x10;
    }

    // Z tracks the plain binary sum; N and V see the high nibble before the
    // final decimal adjust
    let binary = (a as u16 + value as u16 + carry_in) as u8;
    let overflow = ((a as u16 ^ ah) & (value as u16 ^ ah) & 0x80) != 0;

    cpu.set_flag(Status::ZERO, binary == 0);
    cpu.set_flag(Status::NEGATIVE, ah & 0x80 != 0);
    cpu.set_flag(Status::OVERFLOW, overflow);

    if ah > 0x90 {
        ah += 0x60;
    }

    cpu.set_flag(Status::CARRY, ah > 0xFF);
    cpu.a = ((ah & 0xF0) | (al & 0x0F)) as u8;
}

/// Decimal-mode SBC.
///
/// N, V, Z and C are the flags of the binary subtraction `A + !M + C`, as on NMOS
/// silicon, not a decimal re-derivation. Only the accumulator is BCD-corrected:
/// 6 is subtracted from a nibble that produced no carry in the inverted-operand
/// sum, so `0x12 - 0x01` with C set leaves `0x11`.
fn subtract_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let inverted = !value;
    let carry_in = cpu.flag_c() as u16;

    // Flags are those of the binary subtraction
    add_binary(cpu, inverted);

    let mut al = (a & 0x0F) as u16 + (inverted & 0x0F) as u16 + carry_in;
    let mut ah = (a & 0xF0) as u16 + (inverted & 0xF0) as u16;
    if al < 0x10 {
        al = al.wrapping_sub(0x06);
    } else {
        ah += 0x10;
    }
    if ah < 0x100 {
        ah = ah.wrapping_sub(0x60);
    }

    cpu.a = ((ah & 0xF0) | (al & 0x0F)) as u8;
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode)?;
    cpu.a &= value;
    cpu.update_zero_and_negative(cpu.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode)?;
    cpu.a |= value;
    cpu.update_zero_and_negative(cpu.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode)?;
    cpu.a ^= value;
    cpu.update_zero_and_negative(cpu.a);
    Ok(())
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let register = cpu.a;
    compare(cpu, mode, register)
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let register = cpu.x;
    compare(cpu, mode, register)
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let register = cpu.y;
    compare(cpu, mode, register)
}

/// Subtracts the operand from `register` without storing the result.
///
/// C is set when the difference is non-negative. Z and N come from the low byte
/// of the two's-complement difference.
fn compare<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    register: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode)?;
    let diff = register as i16 - value as i16;

    cpu.set_flag(Status::CARRY, diff >= 0);
    cpu.update_zero_and_negative(diff as u8);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z reflects `A & M`; N and V are copied straight from bits 7 and 6 of the
/// operand. The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode)?;

    cpu.set_flag(Status::ZERO, cpu.a & value == 0);
    cpu.set_flag(Status::NEGATIVE, value & 0x80 != 0);
    cpu.set_flag(Status::OVERFLOW, value & 0x40 != 0);
    Ok(())
}
