//! WASM API for the 6502 core.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection and
//! soft switch registration. Register names, addresses and values cross this
//! boundary as hexadecimal strings and are parsed with [`crate::hex`].

use crate::hex::{parse_hex, parse_register};
use crate::{ExecutionError, FlatMemory, SoftSwitch, CPU};
use log::warn;
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<ExecutionError> for JsError {
    fn from(err: ExecutionError) -> Self {
        JsError::new(&err.to_string())
    }
}

/// Soft switch backed by a JavaScript function `(address, value) => result`.
///
/// `value` is `undefined` for reads. Returning anything other than `undefined`
/// intercepts the access. A read result that is not an integer in 0-255 is
/// rejected and the read falls through to the store.
struct JsSoftSwitch {
    callback: js_sys::Function,
}

impl JsSoftSwitch {
    fn call(&self, addr: u16, value: JsValue) -> JsValue {
        self.callback
            .call2(&JsValue::NULL, &JsValue::from(addr), &value)
            .unwrap_or(JsValue::UNDEFINED)
    }
}

impl SoftSwitch for JsSoftSwitch {
    fn read(&mut self, addr: u16) -> Option<u8> {
        let result = self.call(addr, JsValue::UNDEFINED);
        if result.is_undefined() {
            return None;
        }
        let byte = result.as_f64().and_then(byte_from_js);
        if byte.is_none() {
            warn!(
                "soft switch at 0x{:04X} returned {:?}, not a byte",
                addr, result
            );
        }
        byte
    }

    fn write(&mut self, addr: u16, value: u8) -> bool {
        !self.call(addr, JsValue::from(value)).is_undefined()
    }
}

/// Accepts a JS number only when it is an integer in 0-255.
fn byte_from_js(value: f64) -> Option<u8> {
    if value.fract() == 0.0 && (0.0..=255.0).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Emulator {
    /// Create a CPU over a zeroed 64KB store
    #[wasm_bindgen(constructor)]
    pub fn new(compatibility: bool) -> Self {
        Emulator {
            cpu: CPU::new(FlatMemory::new(), compatibility),
        }
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu.step().map_err(JsError::from)
    }

    /// Execute one continuous-run batch and return the cycles consumed
    pub fn run_batch(&mut self) -> Result<f64, JsError> {
        self.cpu
            .run_batch()
            .map(|cycles| cycles as f64)
            .map_err(JsError::from)
    }

    /// Execute multiple cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        self.cpu
            .run_for_cycles(cycles as u64)
            .map(|c| c as u32)
            .map_err(JsError::from)
    }

    /// Load PC from the reset vector
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    /// Read a register by name ("A", "X", "Y", "SR", "SP", "PC") as hex
    pub fn get_register(&self, name: &str) -> Result<String, JsError> {
        let register = parse_register(name)?;
        Ok(format!("{:X}", self.cpu.register(register)))
    }

    /// Set a register by name from a hex string
    pub fn set_register(&mut self, name: &str, value: &str) -> Result<(), JsError> {
        let register = parse_register(name)?;
        let value = parse_hex(value)?;
        self.cpu.set_register(register, value)?;
        Ok(())
    }

    /// Decoded flags as an object `{ n, v, unused, b, d, i, z, c }`
    pub fn get_flags(&self) -> js_sys::Object {
        let flags = self.cpu.status_flags();
        let object = js_sys::Object::new();
        for (name, value) in [
            ("n", flags.n),
            ("v", flags.v),
            ("unused", flags.unused),
            ("b", flags.b),
            ("d", flags.d),
            ("i", flags.i),
            ("z", flags.z),
            ("c", flags.c),
        ] {
            let _ = js_sys::Reflect::set(&object, &JsValue::from(name), &JsValue::from(value));
        }
        object
    }

    /// Read a byte through the soft switch chain
    pub fn read_memory(&mut self, addr: &str) -> Result<u8, JsError> {
        let addr = parse_hex(addr)?;
        Ok(self.cpu.read_memory(addr))
    }

    /// Write a byte given as hex; values wider than a byte are rejected
    pub fn write_memory(&mut self, addr: &str, value: &str) -> Result<(), JsError> {
        let addr = parse_hex(addr)?;
        let value = parse_hex(value)?;
        self.cpu.write_memory(addr, value as i32)?;
        Ok(())
    }

    /// Raw bytes in `start..=end`, bypassing soft switches
    pub fn memory_range(&self, start: u16, end: u16) -> Vec<u8> {
        self.cpu.memory_range(start..=end)
    }

    /// Load a program into memory and set PC
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        self.cpu.memory_mut().load(start_addr, program);
        self.cpu.set_pc(start_addr);
    }

    /// Live stack as an array of `[address, value]` pairs
    pub fn stack(&self) -> js_sys::Array {
        self.cpu
            .stack()
            .into_iter()
            .map(|entry| {
                js_sys::Array::of2(&JsValue::from(entry.address), &JsValue::from(entry.value))
            })
            .collect()
    }

    /// Register a JavaScript soft switch for `start..=end`
    pub fn add_soft_switch(
        &mut self,
        owner: &str,
        start: u16,
        end: u16,
        callback: js_sys::Function,
    ) {
        self.cpu
            .add_soft_switch(owner, start..=end, Box::new(JsSoftSwitch { callback }));
    }

    /// Remove every soft switch registered by `owner`
    pub fn remove_soft_switches(&mut self, owner: &str) -> usize {
        self.cpu.remove_soft_switches(owner)
    }
}
