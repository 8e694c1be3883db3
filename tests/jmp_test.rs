//! Tests for JMP absolute and indirect.

use core6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8], compatibility: bool) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xC000, program);
    CPU::new(memory, compatibility)
}

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu(&[0x4C, 0x34, 0x12], false);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_jmp_indirect() {
    let mut cpu = setup_cpu(&[0x6C, 0x00, 0x30], false);
    cpu.memory_mut().write(0x3000, 0x78);
    cpu.memory_mut().write(0x3001, 0x56);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x5678);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_jmp_indirect_page_bug_in_compatibility_mode() {
    // JMP ($30FF): low byte from $30FF, high byte from $3000
    let mut cpu = setup_cpu(&[0x6C, 0xFF, 0x30], true);
    cpu.memory_mut().write(0x30FF, 0x80);
    cpu.memory_mut().write(0x3000, 0x50);
    cpu.memory_mut().write(0x3100, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x5080);
}

#[test]
fn test_jmp_indirect_crosses_page_without_compatibility() {
    let mut cpu = setup_cpu(&[0x6C, 0xFF, 0x30], false);
    cpu.memory_mut().write(0x30FF, 0x80);
    cpu.memory_mut().write(0x3000, 0x50);
    cpu.memory_mut().write(0x3100, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x4080);
}
