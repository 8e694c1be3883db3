//! Tests for the ADC (Add with Carry) instruction.
//!
//! Tests cover:
//! - Binary addition with and without carry in
//! - Flag updates (C, Z, V, N)
//! - Decimal mode correction
//! - Addressing modes reading through the bus

use core6502::{FlatMemory, MemoryBus, Status, CPU};

/// Creates a CPU with `program` at the power-on PC.
fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xC000, program);
    CPU::new(memory, false)
}

// ========== Binary Mode ==========

#[test]
fn test_adc_immediate_basic() {
    let mut cpu = setup_cpu(&[0x69, 0x05]); // ADC #$05
    cpu.set_a(0x10);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x15);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0xC002);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_adc_with_carry_in() {
    let mut cpu = setup_cpu(&[0x69, 0x05]);
    cpu.set_a(0x10);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x16);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_carry_and_zero() {
    let mut cpu = setup_cpu(&[0x69, 0xFF]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00); // 0x100 wrapped
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_positive_overflow() {
    let mut cpu = setup_cpu(&[0x69, 0x50]);
    cpu.set_a(0x50);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xA0); // 80 + 80 = 160, not representable as i8
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_negative_overflow() {
    let mut cpu = setup_cpu(&[0x69, 0x90]);
    cpu.set_a(0xD0);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x60); // -48 + -112 = -160
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_preserves_untouched_flags() {
    let mut cpu = setup_cpu(&[0x69, 0x01]);
    cpu.set_status(0b0011_0100); // unused, B, I

    cpu.step().unwrap();

    assert!(cpu.flag_i());
    assert!(cpu.flag_b());
    assert!(cpu.status_flags().unused);
}

// ========== Decimal Mode ==========

#[test]
fn test_adc_decimal_simple() {
    let mut cpu = setup_cpu(&[0x69, 0x25]);
    cpu.set_a(0x19);
    cpu.set_flag(Status::DECIMAL, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x44);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_decimal_carry_out() {
    let mut cpu = setup_cpu(&[0x69, 0x01]);
    cpu.set_a(0x99);
    cpu.set_flag(Status::DECIMAL, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    // Z follows the binary sum 0x9A, not the decimal result
    assert!(!cpu.flag_z());
}

#[test]
fn test_adc_decimal_with_carry_in() {
    let mut cpu = setup_cpu(&[0x69, 0x49]);
    cpu.set_a(0x50);
    cpu.set_flag(Status::DECIMAL, true);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
}

#[test]
fn test_adc_decimal_high_digit_only() {
    let mut cpu = setup_cpu(&[0x69, 0x50]);
    cpu.set_a(0x50);
    cpu.set_flag(Status::DECIMAL, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    // N and V come from the high nibble sum 0xA0 before the final adjust
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
}

// ========== Addressing Modes ==========

#[test]
fn test_adc_zero_page() {
    let mut cpu = setup_cpu(&[0x65, 0x42]);
    cpu.memory_mut().write(0x0042, 0x22);
    cpu.set_a(0x11);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x33);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_adc_absolute_y() {
    let mut cpu = setup_cpu(&[0x79, 0x00, 0x20]);
    cpu.memory_mut().write(0x2005, 0x07);
    cpu.set_y(0x05);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x08);
    assert_eq!(cpu.pc(), 0xC003);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_adc_indirect_y() {
    let mut cpu = setup_cpu(&[0x71, 0x15]);
    cpu.memory_mut().write(0x0015, 0x00);
    cpu.memory_mut().write(0x0016, 0xD0);
    cpu.memory_mut().write(0xD012, 0x40);
    cpu.set_y(0x12);
    cpu.set_a(0x02);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.cycles(), 5);
}
