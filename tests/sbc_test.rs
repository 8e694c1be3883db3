//! Tests for the SBC (Subtract with Carry) instruction.
//!
//! The carry flag is an inverted borrow: set means "no borrow".

use core6502::{FlatMemory, Status, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xC000, program);
    CPU::new(memory, false)
}

#[test]
fn test_sbc_without_borrow() {
    let mut cpu = setup_cpu(&[0xE9, 0x10]); // SBC #$10
    cpu.set_a(0x50);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x40);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_sbc_with_borrow_in() {
    let mut cpu = setup_cpu(&[0xE9, 0x10]);
    cpu.set_a(0x50);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x3F);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_borrow_out() {
    let mut cpu = setup_cpu(&[0xE9, 0x01]);
    cpu.set_a(0x00);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xFF);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_sbc_equal_operands_sets_zero() {
    let mut cpu = setup_cpu(&[0xE9, 0x42]);
    cpu.set_a(0x42);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_overflow() {
    let mut cpu = setup_cpu(&[0xE9, 0x01]);
    cpu.set_a(0x80); // -128 - 1
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
}

// ========== Decimal Mode ==========

#[test]
fn test_sbc_decimal_simple() {
    let mut cpu = setup_cpu(&[0xE9, 0x25]);
    cpu.set_a(0x50);
    cpu.set_flag(Status::DECIMAL, true);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x25);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_low_digit_borrow() {
    let mut cpu = setup_cpu(&[0xE9, 0x06]);
    cpu.set_a(0x25);
    cpu.set_flag(Status::DECIMAL, true);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x19);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_wraps_below_zero() {
    let mut cpu = setup_cpu(&[0xE9, 0x01]);
    cpu.set_a(0x00);
    cpu.set_flag(Status::DECIMAL, true);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x99);
    assert!(!cpu.flag_c());
}

#[test]
fn test_sbc_decimal_borrow_in() {
    let mut cpu = setup_cpu(&[0xE9, 0x00]);
    cpu.set_a(0x10);
    cpu.set_flag(Status::DECIMAL, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x09);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_flags_follow_binary_result() {
    let mut cpu = setup_cpu(&[0xE9, 0x01, 0xE9, 0x01]);
    cpu.set_a(0x12);
    cpu.set_flag(Status::DECIMAL, true);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x11);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());

    // 0x00 - 0x01: binary 0xFF drives N, decimal result 0x99
    cpu.set_a(0x00);
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x99);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_v());
}
