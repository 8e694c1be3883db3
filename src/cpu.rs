//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state, the
//! host-facing accessors, and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status register**: packed NV-BDIZC byte
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Running flag**: set for the duration of a step or run session
//!
//! ## Execution Model
//!
//! - `step()` / `step_with()`: Execute one instruction
//! - `run_batch()`: Execute at least one batch worth of cycles
//! - `run()`: Execute batches until `stop()` is called
//! - `run_for_cycles()`: Execute until a cycle budget is exhausted

use std::ops::RangeInclusive;

use log::{debug, trace, warn};

use crate::devices::SoftSwitch;
use crate::instructions;
use crate::{Bus, CpuConfig, ExecutionError, MemoryBus, Status, StatusFlags, OPCODE_TABLE};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Vector the BRK instruction loads the program counter from.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Vector `reset()` loads the program counter from.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Program counter at power-on.
pub const POWER_ON_PC: u16 = 0xC000;

/// Registers addressable through [`CPU::register`] and [`CPU::set_register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    A,
    X,
    Y,
    Status,
    Sp,
    Pc,
}

/// One live byte of the hardware stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackEntry {
    pub address: u16,
    pub value: u8,
}

fn narrow_register(register: Register, value: u16) -> Result<u8, ExecutionError> {
    u8::try_from(value).map_err(|_| {
        ExecutionError::InvalidNumericInput(format!("{:?} cannot hold 0x{:X}", register, value))
    })
}

/// 6502 CPU state and execution context.
///
/// The CPU is generic over the host's memory store via the `MemoryBus` trait. All
/// instruction-level memory traffic goes through the internal [`Bus`], which
/// consults registered soft switches first.
///
/// # Examples
///
/// ```
/// use core6502::{CPU, FlatMemory};
///
/// let cpu = CPU::new(FlatMemory::new(), false);
///
/// assert_eq!(cpu.pc(), 0xC000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert_eq!(cpu.status(), 0x00);
/// assert_eq!(cpu.cycles(), 0);
/// assert!(!cpu.is_running());
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    pub(crate) status: Status,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    pub(crate) running: bool,

    /// Address of the opcode currently executing, for error reports
    pub(crate) current_pc: u16,

    pub(crate) config: CpuConfig,

    pub(crate) bus: Bus<M>,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU over the host's memory store.
    ///
    /// `compatibility` enables the NMOS `JMP ($xxFF)` page-wrap bug. Registers start
    /// at A=X=Y=0, SR=0, SP=0xFF, PC=0xC000.
    pub fn new(memory: M, compatibility: bool) -> Self {
        Self::with_config(memory, CpuConfig::default().with_compatibility(compatibility))
    }

    /// Creates a new CPU with explicit configuration.
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: POWER_ON_PC,
            sp: 0xFF,
            status: Status::empty(),
            cycles: 0,
            running: false,
            current_pc: POWER_ON_PC,
            config,
            bus: Bus::new(memory),
        }
    }

    /// Loads PC from the reset vector at 0xFFFC/0xFFFD, resets SP to 0xFF and
    /// sets the interrupt disable flag. The cycle counter is not touched.
    pub fn reset(&mut self) {
        self.pc = self.bus.read_word(RESET_VECTOR);
        self.sp = 0xFF;
        self.status.insert(Status::INTERRUPT);
        self.running = false;
        debug!("reset: pc=0x{:04X}", self.pc);
    }

    /// Executes one instruction.
    ///
    /// Fetches the opcode at PC, advances PC past it, and dispatches. Returns
    /// `UnknownOpcode` (carrying the opcode and its address) for bytes with no
    /// table entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, MemoryBus, ExecutionError};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xC000, 0xEA); // NOP
    /// mem.write(0xC001, 0x02); // undocumented
    ///
    /// let mut cpu = CPU::new(mem, false);
    /// cpu.step().unwrap();
    /// assert_eq!(cpu.cycles(), 2);
    ///
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::UnknownOpcode { opcode: 0x02, pc: 0xC001 })
    /// );
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        self.step_with(|_| {})
    }

    /// Executes one instruction, then calls `on_step` with the updated CPU.
    ///
    /// The callback is not invoked if the instruction fails. Stepping from inside a
    /// [`CPU::run`] callback leaves the run session active.
    pub fn step_with<F>(&mut self, on_step: F) -> Result<(), ExecutionError>
    where
        F: FnOnce(&Self),
    {
        let was_running = self.running;
        self.running = true;
        let result = self.fetch_and_execute();
        if result.is_ok() {
            on_step(self);
        }
        self.running = was_running;
        result
    }

    /// Dispatches an opcode that has already been fetched.
    ///
    /// PC must point just past the opcode byte, as it does after a fetch.
    pub fn execute(&mut self, opcode: u8) -> Result<(), ExecutionError> {
        self.current_pc = self.pc.wrapping_sub(1);

        let Some(instruction) = OPCODE_TABLE[opcode as usize] else {
            warn!(
                "undefined opcode 0x{:02X} at 0x{:04X}",
                opcode, self.current_pc
            );
            return Err(ExecutionError::UnknownOpcode {
                opcode,
                pc: self.current_pc,
            });
        };

        trace!(
            "{:04X}  {:02X}  {} {:?}",
            self.current_pc,
            opcode,
            instruction.mnemonic(),
            instruction.mode
        );

        instructions::execute(self, instruction)?;
        self.cycles += instruction.cycles as u64;
        Ok(())
    }

    fn fetch_and_execute(&mut self) -> Result<(), ExecutionError> {
        let opcode = self.fetch_byte();
        self.execute(opcode)
    }

    /// Runs one continuous-run batch: steps until at least `batch_cycles` cycles
    /// have elapsed. Returns the cycles consumed.
    pub fn run_batch(&mut self) -> Result<u64, ExecutionError> {
        self.run_for_cycles(self.config.batch_cycles)
    }

    /// Runs batches until stopped, invoking `on_batch` after each one.
    ///
    /// The callback may call [`CPU::stop`]; the running flag is checked once per
    /// batch, so a batch in flight always completes. An instruction error ends the
    /// run and is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::{CPU, CpuConfig, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xC000, 0x4C); // JMP $C000
    /// mem.write(0xC001, 0x00);
    /// mem.write(0xC002, 0xC0);
    ///
    /// let config = CpuConfig::default().with_batch_cycles(30);
    /// let mut cpu = CPU::with_config(mem, config);
    ///
    /// let mut batches = 0;
    /// cpu.run(|cpu| {
    ///     batches += 1;
    ///     if batches == 3 {
    ///         cpu.stop();
    ///     }
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(batches, 3);
    /// assert_eq!(cpu.cycles(), 90);
    /// ```
    pub fn run<F>(&mut self, mut on_batch: F) -> Result<(), ExecutionError>
    where
        F: FnMut(&mut Self),
    {
        debug!(
            "run started at 0x{:04X}, batch of {} cycles",
            self.pc, self.config.batch_cycles
        );
        self.running = true;

        while self.running {
            if let Err(err) = self.run_batch() {
                self.running = false;
                return Err(err);
            }
            on_batch(self);
        }

        debug!("run stopped at 0x{:04X} after {} cycles", self.pc, self.cycles);
        Ok(())
    }

    /// Requests the continuous run to end after the current batch.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or an error occurs.
    /// Returns the actual number of cycles consumed (may be slightly more than budget
    /// due to instruction granularity).
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.fetch_and_execute()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Stack ==========

    /// Pushes a byte: store at 0x0100 + SP, then decrement SP (wrapping).
    pub fn push(&mut self, value: u8) {
        self.bus.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pops a byte: increment SP (wrapping), then read 0x0100 + SP.
    pub fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.bus.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes a word high byte first, so the low byte ends up at the lower address.
    pub fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push((value & 0xFF) as u8);
    }

    pub fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    /// Live stack contents from 0x0100 + SP + 1 up to 0x01FF, read from the store.
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new(), false);
    /// cpu.push(0xAA);
    /// cpu.push(0xBB);
    ///
    /// let stack = cpu.stack();
    /// assert_eq!(stack.len(), 2);
    /// assert_eq!((stack[0].address, stack[0].value), (0x01FE, 0xBB));
    /// assert_eq!((stack[1].address, stack[1].value), (0x01FF, 0xAA));
    /// ```
    pub fn stack(&self) -> Vec<StackEntry> {
        let first = STACK_BASE + self.sp as u16 + 1;
        (first..=0x01FF)
            .map(|address| StackEntry {
                address,
                value: self.bus.store().read(address),
            })
            .collect()
    }

    // ========== Memory ==========

    /// Reads a byte through the bus, soft switches included.
    pub fn read_memory(&mut self, addr: u16) -> u8 {
        self.bus.read(addr)
    }

    /// Reads a little-endian word through the bus.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        self.bus.read_word(addr)
    }

    /// Writes a byte through the bus after validating it fits in 0-255.
    pub fn write_memory(&mut self, addr: u16, value: i32) -> Result<(), ExecutionError> {
        let byte = u8::try_from(value).map_err(|_| self.invalid_write(addr, value))?;
        self.bus.write(addr, byte);
        Ok(())
    }

    /// Writes a word (low byte first) after validating it fits in 0-0xFFFF.
    pub fn write_memory_word(&mut self, addr: u16, value: i32) -> Result<(), ExecutionError> {
        let word = u16::try_from(value).map_err(|_| self.invalid_write(addr, value))?;
        self.bus.write_word(addr, word);
        Ok(())
    }

    fn invalid_write(&self, address: u16, value: i32) -> ExecutionError {
        warn!(
            "rejected write of {} to 0x{:04X} at 0x{:04X}",
            value, address, self.pc
        );
        ExecutionError::InvalidWrite {
            address,
            value,
            pc: self.pc,
        }
    }

    /// Bytes of the store in `range`, bypassing soft switches.
    ///
    /// # Arguments
    ///
    /// * `range` - Inclusive address range; `0xFF00..=0xFFFF` reaches the vectors
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0x0200, &[1, 2, 3]);
    /// mem.write(0xFFFF, 0xC0);
    /// let cpu = CPU::new(mem, false);
    /// assert_eq!(cpu.memory_range(0x0200..=0x0202), vec![1, 2, 3]);
    /// assert_eq!(cpu.memory_range(0xFFFF..=0xFFFF), vec![0xC0]);
    /// ```
    pub fn memory_range(&self, range: RangeInclusive<u16>) -> Vec<u8> {
        range.map(|addr| self.bus.store().read(addr)).collect()
    }

    /// Registers a soft switch for `range` on behalf of `owner`.
    ///
    /// # Arguments
    ///
    /// * `owner` - Token passed to [`CPU::remove_soft_switches`] to unregister
    /// * `range` - Inclusive address range the switch sees
    /// * `switch` - The handler; later registrations win over earlier ones
    pub fn add_soft_switch(
        &mut self,
        owner: impl Into<String>,
        range: RangeInclusive<u16>,
        switch: Box<dyn SoftSwitch>,
    ) {
        self.bus.add_soft_switch(owner, range, switch);
    }

    /// Removes every soft switch registered by `owner`.
    pub fn remove_soft_switches(&mut self, owner: &str) -> usize {
        self.bus.remove_soft_switches(owner)
    }

    /// Returns a reference to the host store.
    pub fn memory(&self) -> &M {
        self.bus.store()
    }

    /// Returns a mutable reference to the host store, bypassing soft switches.
    pub fn memory_mut(&mut self) -> &mut M {
        self.bus.store_mut()
    }

    /// Consumes the CPU and hands the store back to the host.
    pub fn into_memory(self) -> M {
        self.bus.into_store()
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Retunes the continuous-run batch size.
    pub fn set_batch_cycles(&mut self, batch_cycles: u64) {
        self.config = self.config.with_batch_cycles(batch_cycles);
    }

    // ========== Register Access ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte (NV-BDIZC).
    pub fn status(&self) -> u8 {
        self.status.bits()
    }

    /// Returns the status register as typed flags.
    pub fn status_register(&self) -> Status {
        self.status
    }

    /// Returns the total number of CPU cycles executed since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Sets the accumulator. Flags are not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new(), false);
    /// cpu.set_a(0x80);
    /// assert_eq!(cpu.a(), 0x80);
    /// assert!(!cpu.flag_n());
    /// ```
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register. Flags are not updated.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register. Flags are not updated.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Moves the program counter; the next `step()` fetches from `value`.
    ///
    /// # Arguments
    ///
    /// * `value` - Address of the next opcode to fetch
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer. The next push lands at 0x0100 + `value`.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces the whole status register.
    pub fn set_status(&mut self, value: u8) {
        self.status = Status::from_bits_retain(value);
    }

    /// Reads any register widened to 16 bits.
    pub fn register(&self, register: Register) -> u16 {
        match register {
            Register::A => self.a as u16,
            Register::X => self.x as u16,
            Register::Y => self.y as u16,
            Register::Status => self.status.bits() as u16,
            Register::Sp => self.sp as u16,
            Register::Pc => self.pc,
        }
    }

    /// Sets any register. 8-bit registers reject values above 0xFF.
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, Register};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new(), false);
    /// cpu.set_register(Register::X, 0x01).unwrap();
    /// assert_eq!(cpu.x(), 0x01);
    /// assert!(cpu.set_register(Register::X, 0x100).is_err());
    /// ```
    pub fn set_register(&mut self, register: Register, value: u16) -> Result<(), ExecutionError> {
        match register {
            Register::A => self.a = narrow_register(register, value)?,
            Register::X => self.x = narrow_register(register, value)?,
            Register::Y => self.y = narrow_register(register, value)?,
            Register::Status => {
                self.status = Status::from_bits_retain(narrow_register(register, value)?)
            }
            Register::Sp => self.sp = narrow_register(register, value)?,
            Register::Pc => self.pc = value,
        }
        Ok(())
    }

    // ========== Status Flags ==========

    /// Decoded view of the status register.
    pub fn status_flags(&self) -> StatusFlags {
        self.status.decode()
    }

    /// OR-sets every flag that is true in `flags`; never clears.
    pub fn set_status_flags(&mut self, flags: StatusFlags) {
        self.status.encode(flags);
    }

    /// Returns true if every bit of `flag` is set.
    pub fn flag(&self, flag: Status) -> bool {
        self.status.contains(flag)
    }

    /// Sets or clears a single flag, leaving the others alone.
    ///
    /// # Arguments
    ///
    /// * `flag` - The flag bit (or bits) to change
    /// * `value` - `true` to set, `false` to clear
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::{CPU, FlatMemory, Status};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new(), false);
    /// cpu.set_flag(Status::CARRY, true);
    /// cpu.set_flag(Status::DECIMAL, true);
    /// cpu.set_flag(Status::CARRY, false);
    /// assert_eq!(cpu.status(), 0x08);
    /// ```
    pub fn set_flag(&mut self, flag: Status, value: bool) {
        self.status.set(flag, value);
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag(Status::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag(Status::INTERRUPT)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag(Status::CARRY)
    }

    pub(crate) fn update_zero_and_negative(&mut self, value: u8) {
        self.status.update_zero_and_negative(value);
    }
}
