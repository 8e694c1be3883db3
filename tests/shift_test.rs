//! Tests for ASL, LSR, ROL and ROR on the accumulator and memory.

use core6502::{FlatMemory, MemoryBus, Status, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xC000, program);
    CPU::new(memory, false)
}

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu(&[0x0A]);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0xC001);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_asl_memory_writes_back() {
    let mut cpu = setup_cpu(&[0x06, 0x10]);
    cpu.memory_mut().write(0x0010, 0x40);
    cpu.set_a(0x11);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0x80);
    assert_eq!(cpu.a(), 0x11);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_lsr_accumulator_to_zero() {
    let mut cpu = setup_cpu(&[0x4A]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_rol_feeds_carry_into_bit0() {
    let mut cpu = setup_cpu(&[0x2A]);
    cpu.set_a(0x80);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());
}

#[test]
fn test_ror_feeds_carry_into_bit7() {
    let mut cpu = setup_cpu(&[0x6A]);
    cpu.set_a(0x02);
    cpu.set_flag(Status::CARRY, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_absolute_x() {
    let mut cpu = setup_cpu(&[0x7E, 0x00, 0x20]);
    cpu.memory_mut().write(0x2001, 0x01);
    cpu.set_x(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x2001), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_asl_and_lsr_ignore_carry_in() {
    // ASL A; LSR A
    let mut cpu = setup_cpu(&[0x0A, 0x4A]);
    cpu.set_flag(Status::CARRY, true);
    cpu.set_a(0x40);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_c());

    cpu.set_flag(Status::CARRY, true);
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x40);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_n());
}
