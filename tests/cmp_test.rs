//! Tests for CMP, CPX and CPY.
//!
//! Compares subtract without borrow and only touch C, Z and N.

use core6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xC000, program);
    CPU::new(memory, false)
}

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cpu(&[0xC9, 0x42]);
    cpu.set_a(0x42);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x42);
}

#[test]
fn test_cmp_greater() {
    let mut cpu = setup_cpu(&[0xC9, 0x10]);
    cpu.set_a(0x50);

    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_less() {
    let mut cpu = setup_cpu(&[0xC9, 0x02]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(cpu.flag_n()); // 0x01 - 0x02 = 0xFF
    assert!(!cpu.flag_z());
}

#[test]
fn test_cmp_negative_from_low_byte() {
    // 0x01 - 0x90 = -0x8F, low byte 0x71 has bit 7 clear
    let mut cpu = setup_cpu(&[0xC9, 0x90]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_ignores_carry_in() {
    let mut cpu = setup_cpu(&[0xC9, 0x42]);
    cpu.set_a(0x42);
    cpu.set_status(0x00);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
}

#[test]
fn test_cpx_zero_page() {
    let mut cpu = setup_cpu(&[0xE4, 0x80]);
    cpu.memory_mut().write(0x0080, 0x05);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_cpy_absolute() {
    let mut cpu = setup_cpu(&[0xCC, 0x34, 0x12]);
    cpu.memory_mut().write(0x1234, 0x80);
    cpu.set_y(0x7F);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.pc(), 0xC003);
}
