//! # Status Register Model
//!
//! The 6502 packs its condition flags into a single byte (NV-BDIZC). The CPU keeps
//! the packed byte as the source of truth; [`StatusFlags`] is the decoded view the
//! host reads and writes.
//!
//! Bits that an instruction does not explicitly set or clear keep their previous
//! value, including the unused bit 5.

use bitflags::bitflags;

bitflags! {
    /// Packed processor status register.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: unused
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Status: u8 {
        const NEGATIVE = 0b1000_0000;
        const OVERFLOW = 0b0100_0000;
        const UNUSED = 0b0010_0000;
        const BREAK = 0b0001_0000;
        const DECIMAL = 0b0000_1000;
        const INTERRUPT = 0b0000_0100;
        const ZERO = 0b0000_0010;
        const CARRY = 0b0000_0001;
    }
}

impl Status {
    /// Sets Z when `value` is zero (clears it otherwise) and copies bit 7 into N.
    ///
    /// # Examples
    ///
    /// ```
    /// use core6502::Status;
    ///
    /// let mut status = Status::CARRY;
    /// status.update_zero_and_negative(0x80);
    /// assert!(status.contains(Status::NEGATIVE | Status::CARRY));
    /// assert!(!status.contains(Status::ZERO));
    /// ```
    pub fn update_zero_and_negative(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Decodes the register into eight independent flags.
    pub fn decode(self) -> StatusFlags {
        StatusFlags {
            n: self.contains(Status::NEGATIVE),
            v: self.contains(Status::OVERFLOW),
            unused: self.contains(Status::UNUSED),
            b: self.contains(Status::BREAK),
            d: self.contains(Status::DECIMAL),
            i: self.contains(Status::INTERRUPT),
            z: self.contains(Status::ZERO),
            c: self.contains(Status::CARRY),
        }
    }

    /// OR-sets every flag that is `true` in `flags`.
    ///
    /// This is a partial update: flags that are `false` in the input are left
    /// untouched, never cleared.
    ///
    /// ```
    /// use core6502::{Status, StatusFlags};
    ///
    /// let mut status = Status::CARRY;
    /// status.encode(StatusFlags { n: true, z: true, ..StatusFlags::default() });
    /// assert_eq!(status.bits(), 0x83);
    /// ```
    pub fn encode(&mut self, flags: StatusFlags) {
        for (set, flag) in [
            (flags.n, Status::NEGATIVE),
            (flags.v, Status::OVERFLOW),
            (flags.unused, Status::UNUSED),
            (flags.b, Status::BREAK),
            (flags.d, Status::DECIMAL),
            (flags.i, Status::INTERRUPT),
            (flags.z, Status::ZERO),
            (flags.c, Status::CARRY),
        ] {
            if set {
                self.insert(flag);
            }
        }
    }
}

/// Decoded view of the status register, most significant bit first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusFlags {
    pub n: bool,
    pub v: bool,
    pub unused: bool,
    pub b: bool,
    pub d: bool,
    pub i: bool,
    pub z: bool,
    pub c: bool,
}

impl From<Status> for StatusFlags {
    fn from(status: Status) -> Self {
        status.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_all_clear() {
        assert_eq!(Status::empty().decode(), StatusFlags::default());
    }

    #[test]
    fn test_decode_msb_first() {
        let flags = Status::from_bits_retain(0b1010_0101).decode();
        assert!(flags.n);
        assert!(!flags.v);
        assert!(flags.unused);
        assert!(!flags.b);
        assert!(!flags.d);
        assert!(flags.i);
        assert!(!flags.z);
        assert!(flags.c);
    }

    #[test]
    fn test_encode_never_clears() {
        let mut status = Status::all();
        status.encode(StatusFlags::default());
        assert_eq!(status, Status::all());
    }

    #[test]
    fn test_encode_n_and_z() {
        let mut status = Status::empty();
        status.encode(StatusFlags {
            n: true,
            z: true,
            ..StatusFlags::default()
        });
        assert_eq!(status.bits(), 130);
    }

    #[test]
    fn test_update_zero_and_negative_exhaustive() {
        for value in 0..=255u8 {
            let mut status = Status::OVERFLOW | Status::CARRY;
            status.update_zero_and_negative(value);
            assert_eq!(status.contains(Status::ZERO), value == 0);
            assert_eq!(status.contains(Status::NEGATIVE), value & 0x80 != 0);
            assert!(status.contains(Status::OVERFLOW | Status::CARRY));
        }
    }
}
