//! The write side of the scalar stream.

use packwire_codec::{
    SpecialA, SpecialB, fixed, packing, utf8,
    varint::{encode_biased_i16, encode_short_u16, encode_varint, encode_varint_pair},
};
use packwire_common::Result;

/// A byte accumulator that scalar values are encoded into.
///
/// Implementors only provide [`put`](Sink::put); every scalar encoding is a
/// provided method that builds its (at most 17-byte) frame on the stack and
/// appends it with a single `put`, so a frame is never split by a flush.
///
/// Length-prefixed byte strings are silently truncated to the maximum of their
/// length field; the emitted length always matches the emitted payload.
pub trait Sink {
    /// Appends `bytes` to the stream.
    fn put(&mut self, bytes: &[u8]) -> Result<()>;

    /// Pushes buffered bytes to the underlying destination, if there is one.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Flushes and finalizes the sink.
    fn close(&mut self) -> Result<()> {
        self.flush()
    }

    /// Writes a raw byte run without a length prefix.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.put(bytes)
    }

    fn write_u8(&mut self, v: u8) -> Result<()> {
        self.put(&[v])
    }

    fn write_bool(&mut self, v: bool) -> Result<()> {
        self.put(&[v as u8])
    }

    fn write_bool2(&mut self, b1: bool, b2: bool) -> Result<()> {
        self.put(&[packing::pack_bool2(b1, b2)])
    }

    /// Writes eight booleans into a single byte, boolean `k` in bit `k`.
    fn write_bools(&mut self, bools: [bool; 8]) -> Result<()> {
        self.put(&[packing::pack_bools(bools)])
    }

    fn write_nibbles(&mut self, lo: u8, hi: u8) -> Result<()> {
        self.put(&[packing::pack_nibbles(lo, hi)])
    }

    fn write_u12_u4(&mut self, v12: u16, v4: u8) -> Result<()> {
        self.put(&fixed::encode_u16(packing::pack_u12_u4(v12, v4)))
    }

    fn write_special(&mut self, v: SpecialA) -> Result<()> {
        self.put(&[v.pack()])
    }

    fn write_special2(&mut self, v: SpecialB) -> Result<()> {
        self.put(&[v.pack()])
    }

    fn write_u16(&mut self, v: u16) -> Result<()> {
        self.put(&fixed::encode_u16(v))
    }

    /// Writes the low 24 bits of `v`.
    fn write_u24(&mut self, v: u32) -> Result<()> {
        self.put(&fixed::encode_u24(v))
    }

    fn write_u32(&mut self, v: u32) -> Result<()> {
        self.put(&fixed::encode_u32(v))
    }

    /// Writes the low 48 bits of `v`.
    fn write_u48(&mut self, v: u64) -> Result<()> {
        self.put(&fixed::encode_u48(v))
    }

    fn write_u64(&mut self, v: u64) -> Result<()> {
        self.put(&fixed::encode_u64(v))
    }

    fn write_f32(&mut self, v: f32) -> Result<()> {
        self.put(&fixed::encode_f32(v))
    }

    fn write_f64(&mut self, v: f64) -> Result<()> {
        self.put(&fixed::encode_f64(v))
    }

    fn write_varint(&mut self, v: u64) -> Result<()> {
        self.put(&encode_varint(v))
    }

    fn write_varint_pair(&mut self, v1: u64, v2: u64) -> Result<()> {
        self.put(&encode_varint_pair(v1, v2))
    }

    /// Writes a 16-bit value in one byte if it is below 255, three otherwise.
    fn write_short_u16(&mut self, v: u16) -> Result<()> {
        self.put(&encode_short_u16(v))
    }

    /// Writes a signed 16-bit value in one byte if it is in `-127..=127`,
    /// three otherwise.
    fn write_biased_i16(&mut self, v: i16) -> Result<()> {
        self.put(&encode_biased_i16(v))
    }

    /// Writes a code point as UTF-8. Invalid code points become U+FFFD.
    fn write_code_point(&mut self, cp: u32) -> Result<()> {
        self.put(&utf8::encode_code_point(cp))
    }

    fn write_char(&mut self, c: char) -> Result<()> {
        self.put(&utf8::encode_char(c))
    }

    /// Writes at most 255 bytes of `bytes` behind an 8-bit length.
    fn write_bytes8(&mut self, bytes: &[u8]) -> Result<()> {
        let bytes = &bytes[..bytes.len().min(u8::MAX as usize)];
        self.put(&[bytes.len() as u8])?;
        self.put(bytes)
    }

    /// Writes at most 65535 bytes of `bytes` behind a 16-bit length.
    fn write_bytes16(&mut self, bytes: &[u8]) -> Result<()> {
        let bytes = &bytes[..bytes.len().min(u16::MAX as usize)];
        self.put(&fixed::encode_u16(bytes.len() as u16))?;
        self.put(bytes)
    }

    /// Writes at most `u32::MAX` bytes of `bytes` behind a 32-bit length.
    fn write_bytes32(&mut self, bytes: &[u8]) -> Result<()> {
        let len = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
        let bytes = &bytes[..len as usize];
        self.put(&fixed::encode_u32(len))?;
        self.put(bytes)
    }

    /// Writes the UTF-8 bytes of `s` behind an 8-bit length. Truncation is
    /// byte-wise and may split a multi-byte character.
    fn write_str8(&mut self, s: &str) -> Result<()> {
        self.write_bytes8(s.as_bytes())
    }

    fn write_str16(&mut self, s: &str) -> Result<()> {
        self.write_bytes16(s.as_bytes())
    }

    fn write_str32(&mut self, s: &str) -> Result<()> {
        self.write_bytes32(s.as_bytes())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).put(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).put(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
