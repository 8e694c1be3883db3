//! Tests for INC/DEC and the index register increments and decrements.

use core6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0xC000, program);
    CPU::new(memory, false)
}

#[test]
fn test_inc_zero_page_wraps() {
    let mut cpu = setup_cpu(&[0xE6, 0x10]);
    cpu.memory_mut().write(0x0010, 0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_inc_absolute_x() {
    let mut cpu = setup_cpu(&[0xFE, 0x00, 0x20]);
    cpu.memory_mut().write(0x2003, 0x7F);
    cpu.set_x(0x03);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x2003), 0x80);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_dec_absolute() {
    let mut cpu = setup_cpu(&[0xCE, 0x00, 0x02]);
    cpu.memory_mut().write(0x0200, 0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0200), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_dec_wraps_to_ff() {
    let mut cpu = setup_cpu(&[0xC6, 0x20]);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0020), 0xFF);
    assert!(cpu.flag_n());
}

#[test]
fn test_inx_and_iny_wrap() {
    let mut cpu = setup_cpu(&[0xE8, 0xC8]);
    cpu.set_x(0xFF);
    cpu.set_y(0x7F);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_dex_and_dey() {
    let mut cpu = setup_cpu(&[0xCA, 0x88]);
    cpu.set_x(0x01);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0xFF);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 4);
}
