//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file and memory image, then executes a few
//! instructions under an arbitrary configuration. Errors are expected; panics
//! and broken stack accounting are not.

#![no_main]

use arbitrary::Arbitrary;
use core6502::{CpuConfig, FlatMemory, ZeroPagePolicy, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    compatibility: bool,
    wrap_zero_page: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (a few instructions)
    program: [u8; 8],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Placed at 0x4000 for absolute addressing
    main_memory: [u8; 256],
    irq_vector: u16,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);
    memory.load(0x8000, &input.memory.program);
    memory.load(0xFFFE, &input.memory.irq_vector.to_le_bytes());

    let policy = if input.cpu_state.wrap_zero_page {
        ZeroPagePolicy::Wrap
    } else {
        ZeroPagePolicy::Fault
    };
    let config = CpuConfig::default()
        .with_compatibility(input.cpu_state.compatibility)
        .with_zero_page_policy(policy);

    let mut cpu = CPU::with_config(memory, config);
    cpu.set_pc(0x8000);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    for _ in 0..4 {
        let before = cpu.cycles();
        if cpu.step().is_err() {
            // A failed instruction is never charged
            assert_eq!(cpu.cycles(), before);
            break;
        }
        assert!(cpu.cycles() > before);
    }

    let stack = cpu.stack();
    assert_eq!(stack.len(), 0xFF - cpu.sp() as usize);
});
