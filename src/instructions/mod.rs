//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! Each instruction is implemented as a standalone function that takes a mutable reference
//! to the CPU and the addressing mode from the dispatch table. PC points at the first
//! operand byte on entry; cycle accounting is done by the caller once the function
//! returns successfully.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::{ExecutionError, Instruction, MemoryBus, Operation, Status, CPU};

/// Runs the body of one decoded instruction.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instruction: Instruction,
) -> Result<(), ExecutionError> {
    let mode = instruction.mode;

    match instruction.operation {
        Operation::Adc => alu::execute_adc(cpu, mode),
        Operation::Sbc => alu::execute_sbc(cpu, mode),
        Operation::And => alu::execute_and(cpu, mode),
        Operation::Ora => alu::execute_ora(cpu, mode),
        Operation::Eor => alu::execute_eor(cpu, mode),
        Operation::Cmp => alu::execute_cmp(cpu, mode),
        Operation::Cpx => alu::execute_cpx(cpu, mode),
        Operation::Cpy => alu::execute_cpy(cpu, mode),
        Operation::Bit => alu::execute_bit(cpu, mode),

        Operation::Bcc => branches::execute_branch(cpu, mode, Status::CARRY, false),
        Operation::Bcs => branches::execute_branch(cpu, mode, Status::CARRY, true),
        Operation::Bne => branches::execute_branch(cpu, mode, Status::ZERO, false),
        Operation::Beq => branches::execute_branch(cpu, mode, Status::ZERO, true),
        Operation::Bpl => branches::execute_branch(cpu, mode, Status::NEGATIVE, false),
        Operation::Bmi => branches::execute_branch(cpu, mode, Status::NEGATIVE, true),
        Operation::Bvc => branches::execute_branch(cpu, mode, Status::OVERFLOW, false),
        Operation::Bvs => branches::execute_branch(cpu, mode, Status::OVERFLOW, true),

        Operation::Asl => shifts::execute_asl(cpu, mode),
        Operation::Lsr => shifts::execute_lsr(cpu, mode),
        Operation::Rol => shifts::execute_rol(cpu, mode),
        Operation::Ror => shifts::execute_ror(cpu, mode),

        Operation::Lda => load_store::execute_lda(cpu, mode),
        Operation::Ldx => load_store::execute_ldx(cpu, mode),
        Operation::Ldy => load_store::execute_ldy(cpu, mode),
        Operation::Sta => load_store::execute_sta(cpu, mode),
        Operation::Stx => load_store::execute_stx(cpu, mode),
        Operation::Sty => load_store::execute_sty(cpu, mode),

        Operation::Inc => inc_dec::execute_inc(cpu, mode),
        Operation::Dec => inc_dec::execute_dec(cpu, mode),
        Operation::Inx => inc_dec::execute_inx(cpu),
        Operation::Iny => inc_dec::execute_iny(cpu),
        Operation::Dex => inc_dec::execute_dex(cpu),
        Operation::Dey => inc_dec::execute_dey(cpu),

        Operation::Jmp => control::execute_jmp(cpu, mode),
        Operation::Jsr => control::execute_jsr(cpu, mode),
        Operation::Rts => control::execute_rts(cpu),
        Operation::Rti => control::execute_rti(cpu),
        Operation::Brk => control::execute_brk(cpu),
        Operation::Nop => Ok(()),

        Operation::Pha => stack::execute_pha(cpu),
        Operation::Php => stack::execute_php(cpu),
        Operation::Pla => stack::execute_pla(cpu),
        Operation::Plp => stack::execute_plp(cpu),

        Operation::Clc => flags::execute_flag(cpu, Status::CARRY, false),
        Operation::Sec => flags::execute_flag(cpu, Status::CARRY, true),
        Operation::Cli => flags::execute_flag(cpu, Status::INTERRUPT, false),
        Operation::Sei => flags::execute_flag(cpu, Status::INTERRUPT, true),
        Operation::Cld => flags::execute_flag(cpu, Status::DECIMAL, false),
        Operation::Sed => flags::execute_flag(cpu, Status::DECIMAL, true),
        Operation::Clv => flags::execute_flag(cpu, Status::OVERFLOW, false),

        Operation::Tax => transfer::execute_tax(cpu),
        Operation::Tay => transfer::execute_tay(cpu),
        Operation::Txa => transfer::execute_txa(cpu),
        Operation::Tya => transfer::execute_tya(cpu),
        Operation::Tsx => transfer::execute_tsx(cpu),
        Operation::Txs => transfer::execute_txs(cpu),
    }
}
