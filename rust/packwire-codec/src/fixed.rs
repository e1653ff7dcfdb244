//! Fixed-width little-endian integers and their floating-point bit patterns.
//!
//! The `decode_*` functions take a slice that must hold at least the width of
//! the value; sources always hand over exactly that many bytes.

use byteorder::{ByteOrder, LE};

#[inline]
pub fn encode_u16(v: u16) -> [u8; 2] {
    v.to_le_bytes()
}

#[inline]
pub fn encode_u24(v: u32) -> [u8; 3] {
    let mut buf = [0u8; 3];
    LE::write_u24(&mut buf, v & 0x00ff_ffff);
    buf
}

#[inline]
pub fn encode_u32(v: u32) -> [u8; 4] {
    v.to_le_bytes()
}

#[inline]
pub fn encode_u48(v: u64) -> [u8; 6] {
    let mut buf = [0u8; 6];
    LE::write_u48(&mut buf, v & 0x0000_ffff_ffff_ffff);
    buf
}

#[inline]
pub fn encode_u64(v: u64) -> [u8; 8] {
    v.to_le_bytes()
}

#[inline]
pub fn encode_f32(v: f32) -> [u8; 4] {
    encode_u32(v.to_bits())
}

#[inline]
pub fn encode_f64(v: f64) -> [u8; 8] {
    encode_u64(v.to_bits())
}

#[inline]
pub fn decode_u16(buf: &[u8]) -> u16 {
    LE::read_u16(buf)
}

#[inline]
pub fn decode_u24(buf: &[u8]) -> u32 {
    LE::read_u24(buf)
}

#[inline]
pub fn decode_u32(buf: &[u8]) -> u32 {
    LE::read_u32(buf)
}

#[inline]
pub fn decode_u48(buf: &[u8]) -> u64 {
    LE::read_u48(buf)
}

#[inline]
pub fn decode_u64(buf: &[u8]) -> u64 {
    LE::read_u64(buf)
}

#[inline]
pub fn decode_f32(buf: &[u8]) -> f32 {
    f32::from_bits(decode_u32(buf))
}

#[inline]
pub fn decode_f64(buf: &[u8]) -> f64 {
    f64::from_bits(decode_u64(buf))
}

/// Writes the low `buf.len()` bytes of `v`, least significant first.
/// An empty `buf` writes nothing.
#[inline]
pub fn encode_uint(v: u64, buf: &mut [u8]) {
    if !buf.is_empty() {
        let nbytes = buf.len();
        let masked = if nbytes >= 8 {
            v
        } else {
            v & ((1u64 << (nbytes * 8)) - 1)
        };
        LE::write_uint(buf, masked, nbytes);
    }
}

/// Reads a `buf.len()`-byte little-endian integer, zero-extended to 64 bits.
#[inline]
pub fn decode_uint(buf: &[u8]) -> u64 {
    if buf.is_empty() {
        0
    } else {
        LE::read_uint(buf, buf.len())
    }
}
