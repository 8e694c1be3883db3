//! # Boundary Parsing Helpers
//!
//! The core is numeric throughout. Hosts that receive registers, addresses and
//! values as text (debugger consoles, the WASM binding) convert them here before
//! calling into the CPU.

use std::str::FromStr;

use crate::{ExecutionError, Register};

/// Parses a hexadecimal number, with or without a `$` or `0x` prefix.
///
/// # Examples
///
/// ```
/// use core6502::hex::parse_hex;
///
/// assert_eq!(parse_hex("C000").unwrap(), 0xC000);
/// assert_eq!(parse_hex("$ff").unwrap(), 0xFF);
/// assert_eq!(parse_hex("0x1F").unwrap(), 0x1F);
/// assert!(parse_hex("xyz").is_err());
/// ```
pub fn parse_hex(input: &str) -> Result<u16, ExecutionError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix('$')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    u16::from_str_radix(digits, 16)
        .map_err(|_| ExecutionError::InvalidNumericInput(input.to_string()))
}

/// Parses a register name (`A`, `X`, `Y`, `SR`/`P`, `SP`/`S`, `PC`), case-insensitively.
pub fn parse_register(name: &str) -> Result<Register, ExecutionError> {
    name.parse()
}

impl FromStr for Register {
    type Err = ExecutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "AC" => Ok(Register::A),
            "X" | "XR" => Ok(Register::X),
            "Y" | "YR" => Ok(Register::Y),
            "SR" | "P" => Ok(Register::Status),
            "SP" | "S" => Ok(Register::Sp),
            "PC" => Ok(Register::Pc),
            _ => Err(ExecutionError::InvalidNumericInput(s.to_string())),
        }
    }
}

/// Reinterprets a byte as a two's-complement signed value.
///
/// ```
/// use core6502::hex::unsigned_to_signed;
///
/// assert_eq!(unsigned_to_signed(0x7F).unwrap(), 127);
/// assert_eq!(unsigned_to_signed(0x80).unwrap(), -128);
/// assert_eq!(unsigned_to_signed(0xFF).unwrap(), -1);
/// assert!(unsigned_to_signed(256).is_err());
/// ```
pub fn unsigned_to_signed(value: u16) -> Result<i8, ExecutionError> {
    let byte = u8::try_from(value)
        .map_err(|_| ExecutionError::InvalidNumericInput(format!("{} is not a byte", value)))?;
    Ok(byte as i8)
}

/// Encodes 0-99 as packed BCD.
///
/// ```
/// use core6502::hex::to_bcd;
///
/// assert_eq!(to_bcd(42).unwrap(), 0x42);
/// assert!(to_bcd(100).is_err());
/// ```
pub fn to_bcd(value: i32) -> Result<u8, ExecutionError> {
    if !(0..=99).contains(&value) {
        return Err(ExecutionError::InvalidBcdValue(value));
    }
    let tens = (value / 10) as u8;
    let ones = (value % 10) as u8;
    Ok((tens << 4) | ones)
}

/// Decodes a packed BCD byte. Nibbles above 9 are taken at face value.
pub fn from_bcd(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}

/// Direction of a one-bit shift or rotate.
///
/// ASL/ROL shift left and LSR/ROR shift right. Host tooling can parse one from
/// `"left"` or `"right"` in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Left,
    Right,
}

impl ShiftDirection {
    /// Shifts `value` one bit with `fill` entering the vacated bit.
    ///
    /// Returns the result and the bit shifted out.
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::ShiftDirection;
    ///
    /// assert_eq!(ShiftDirection::Left.shift(0x81, false), (0x02, true));
    /// assert_eq!(ShiftDirection::Right.shift(0x02, true), (0x81, false));
    /// ```
    pub fn shift(self, value: u8, fill: bool) -> (u8, bool) {
        match self {
            ShiftDirection::Left => ((value << 1) | fill as u8, value & 0x80 != 0),
            ShiftDirection::Right => ((value >> 1) | ((fill as u8) << 7), value & 0x01 != 0),
        }
    }
}

impl FromStr for ShiftDirection {
    type Err = ExecutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(ShiftDirection::Left),
            "right" => Ok(ShiftDirection::Right),
            _ => Err(ExecutionError::InvalidShiftDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_rejects_overflow() {
        assert!(parse_hex("10000").is_err());
        assert!(parse_hex("").is_err());
        assert_eq!(parse_hex(" ffff ").unwrap(), 0xFFFF);
    }

    #[test]
    fn test_parse_register_names() {
        assert_eq!(parse_register("pc").unwrap(), Register::Pc);
        assert_eq!(parse_register("SR").unwrap(), Register::Status);
        assert_eq!(parse_register("x").unwrap(), Register::X);
        assert!(matches!(
            parse_register("Q"),
            Err(ExecutionError::InvalidNumericInput(_))
        ));
    }

    #[test]
    fn test_bcd_round_trip() {
        for n in 0..=99 {
            assert_eq!(from_bcd(to_bcd(n).unwrap()) as i32, n);
        }
        assert_eq!(to_bcd(-1), Err(ExecutionError::InvalidBcdValue(-1)));
    }

    #[test]
    fn test_shift_direction_parse() {
        assert_eq!("Left".parse::<ShiftDirection>().unwrap(), ShiftDirection::Left);
        assert_eq!("RIGHT".parse::<ShiftDirection>().unwrap(), ShiftDirection::Right);
        assert_eq!(
            "up".parse::<ShiftDirection>(),
            Err(ExecutionError::InvalidShiftDirection("up".to_string()))
        );
    }

    #[test]
    fn test_shift_reports_carry_out() {
        assert_eq!(ShiftDirection::Left.shift(0x81, false), (0x02, true));
        assert_eq!(ShiftDirection::Right.shift(0x81, false), (0x40, true));
        assert_eq!(ShiftDirection::Right.shift(0x02, false), (0x01, false));
    }

    #[test]
    fn test_shift_fills_vacated_bit() {
        assert_eq!(ShiftDirection::Left.shift(0x40, true), (0x81, false));
        assert_eq!(ShiftDirection::Right.shift(0x01, true), (0x80, true));
    }
}
