//! Booleans and small enumerations packed into single bytes.
//!
//! Field values wider than their slot are masked to the slot width, so a
//! stray high bit never leaks into a neighbouring field.

/// Packs two booleans into bits 0 and 1.
#[inline]
pub fn pack_bool2(b1: bool, b2: bool) -> u8 {
    (b1 as u8) | ((b2 as u8) << 1)
}

#[inline]
pub fn unpack_bool2(byte: u8) -> (bool, bool) {
    (byte & 1 != 0, byte & 2 != 0)
}

/// Packs eight booleans, boolean `k` into bit `k`.
#[inline]
pub fn pack_bools(bools: [bool; 8]) -> u8 {
    bools
        .iter()
        .enumerate()
        .fold(0u8, |acc, (k, &b)| acc | ((b as u8) << k))
}

#[inline]
pub fn unpack_bools(byte: u8) -> [bool; 8] {
    std::array::from_fn(|k| byte & (1 << k) != 0)
}

/// Packs two 4-bit values: the first into the low nibble, the second into the
/// high nibble.
#[inline]
pub fn pack_nibbles(lo: u8, hi: u8) -> u8 {
    (lo & 0x0f) | ((hi & 0x0f) << 4)
}

#[inline]
pub fn unpack_nibbles(byte: u8) -> (u8, u8) {
    (byte & 0x0f, byte >> 4)
}

/// Packs a 12-bit value and a 4-bit value into one 16-bit word
/// (bits 0-11 and 12-15 respectively).
#[inline]
pub fn pack_u12_u4(v12: u16, v4: u8) -> u16 {
    (v12 & 0x0fff) | (((v4 & 0x0f) as u16) << 12)
}

#[inline]
pub fn unpack_u12_u4(word: u16) -> (u16, u8) {
    (word & 0x0fff, (word >> 12) as u8)
}

/// A 3-bit value with four flags.
///
/// ```text
/// bit:   7      6      5      4     3   2 1 0
///      flag0  flag1  flag2  flag3   -   value
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialA {
    pub value: u8,
    pub flags: [bool; 4],
}

impl SpecialA {
    pub fn new(value: u8, flags: [bool; 4]) -> SpecialA {
        SpecialA { value, flags }
    }

    pub fn pack(&self) -> u8 {
        let mut byte = self.value & 0x07;
        for (i, &flag) in self.flags.iter().enumerate() {
            if flag {
                byte |= 0x80 >> i;
            }
        }
        byte
    }

    pub fn unpack(byte: u8) -> SpecialA {
        SpecialA {
            value: byte & 0x07,
            flags: std::array::from_fn(|i| byte & (0x80 >> i) != 0),
        }
    }
}

/// A 3-bit value, two 2-bit values and one flag.
///
/// ```text
/// bit:   7     6 5   4 3   2 1 0
///      flag    v3    v2     v1
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialB {
    pub v1: u8,
    pub v2: u8,
    pub v3: u8,
    pub flag: bool,
}

impl SpecialB {
    pub fn new(v1: u8, v2: u8, v3: u8, flag: bool) -> SpecialB {
        SpecialB { v1, v2, v3, flag }
    }

    pub fn pack(&self) -> u8 {
        (self.v1 & 0x07)
            | ((self.v2 & 0x03) << 3)
            | ((self.v3 & 0x03) << 5)
            | ((self.flag as u8) << 7)
    }

    pub fn unpack(byte: u8) -> SpecialB {
        SpecialB {
            v1: byte & 0x07,
            v2: (byte >> 3) & 0x03,
            v3: (byte >> 5) & 0x03,
            flag: byte & 0x80 != 0,
        }
    }
}
