//! The read side of the scalar stream.

use std::io::SeekFrom;

use packwire_codec::{
    SpecialA, SpecialB, fixed, packing, utf8,
    varint::{
        decode_biased_i16_head, decode_short_u16_head, decode_varint_payload, varint_len,
        varint_pair_lens,
    },
};
use packwire_common::{Result, error::Error};

/// A byte supplier that scalar values are decoded from.
///
/// Implementors provide [`take`](Source::take) plus the positioning
/// operations; every scalar decoding is a provided method mirroring the
/// corresponding [`Sink`](crate::Sink) method.
///
/// Running out of input in the middle of a value yields an
/// [`OriginExhausted`](packwire_common::error::ErrorKind::OriginExhausted)
/// error; nothing in this trait panics on malformed or truncated input.
pub trait Source {
    /// Returns the next `n` bytes and advances past them.
    ///
    /// The returned view borrows the source and is only valid until the next
    /// call on it. Use [`read_bytes`](Source::read_bytes) or
    /// [`read_into`](Source::read_into) to keep the bytes.
    fn take(&mut self, n: usize) -> Result<&[u8]>;

    /// Succeeds if no bytes remain, fails with `NotAtEndOfData` otherwise.
    /// Never consumes input.
    fn check_eof(&mut self) -> Result<()>;

    /// Repositions the source and returns the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    /// Logical read position: the number of bytes consumed so far, or the
    /// absolute position established by the last seek plus what followed it.
    fn position(&self) -> u64;

    /// Releases the underlying origin, if any.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    /// Copies the next `buf.len()` bytes into `buf`.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(self.take(buf.len())?);
        Ok(())
    }

    /// Reads the next `n` bytes into a new, independently owned buffer.
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.take(n)?.to_vec())
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a single boolean; any nonzero byte is `true`.
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    fn read_bool2(&mut self) -> Result<(bool, bool)> {
        Ok(packing::unpack_bool2(self.read_u8()?))
    }

    fn read_bools(&mut self) -> Result<[bool; 8]> {
        Ok(packing::unpack_bools(self.read_u8()?))
    }

    fn read_nibbles(&mut self) -> Result<(u8, u8)> {
        Ok(packing::unpack_nibbles(self.read_u8()?))
    }

    fn read_u12_u4(&mut self) -> Result<(u16, u8)> {
        Ok(packing::unpack_u12_u4(self.read_u16()?))
    }

    fn read_special(&mut self) -> Result<SpecialA> {
        Ok(SpecialA::unpack(self.read_u8()?))
    }

    fn read_special2(&mut self) -> Result<SpecialB> {
        Ok(SpecialB::unpack(self.read_u8()?))
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(fixed::decode_u16(self.take(2)?))
    }

    fn read_u24(&mut self) -> Result<u32> {
        Ok(fixed::decode_u24(self.take(3)?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(fixed::decode_u32(self.take(4)?))
    }

    fn read_u48(&mut self) -> Result<u64> {
        Ok(fixed::decode_u48(self.take(6)?))
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(fixed::decode_u64(self.take(8)?))
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(fixed::decode_f32(self.take(4)?))
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(fixed::decode_f64(self.take(8)?))
    }

    fn read_varint(&mut self) -> Result<u64> {
        let len = varint_len(self.read_u8()?)?;
        Ok(decode_varint_payload(self.take(len)?))
    }

    fn read_varint_pair(&mut self) -> Result<(u64, u64)> {
        let (len1, len2) = varint_pair_lens(self.read_u8()?)?;
        let payload = self.take(len1 + len2)?;
        Ok((
            decode_varint_payload(&payload[..len1]),
            decode_varint_payload(&payload[len1..]),
        ))
    }

    fn read_short_u16(&mut self) -> Result<u16> {
        match decode_short_u16_head(self.read_u8()?) {
            Some(v) => Ok(v),
            None => self.read_u16(),
        }
    }

    fn read_biased_i16(&mut self) -> Result<i16> {
        match decode_biased_i16_head(self.read_u8()?) {
            Some(v) => Ok(v),
            None => Ok(self.read_u16()? as i16),
        }
    }

    /// Reads one UTF-8 encoded character (1 to 4 bytes).
    fn read_char(&mut self) -> Result<char> {
        let lead = self.read_u8()?;
        let len = utf8::sequence_len(lead);
        let mut seq = [lead, 0, 0, 0];
        self.read_into(&mut seq[1..len])?;
        utf8::decode_char(&seq[..len])
    }

    fn read_bytes8(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u8()? as usize;
        self.read_bytes(len)
    }

    fn read_bytes16(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u16()? as usize;
        self.read_bytes(len)
    }

    fn read_bytes32(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        self.read_bytes(len)
    }

    /// Reads an 8-bit length-prefixed string. Fails with `InvalidFormat` if
    /// the payload is not valid UTF-8.
    fn read_str8(&mut self) -> Result<String> {
        let len = self.read_u8()? as usize;
        take_string(self, len)
    }

    fn read_str16(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        take_string(self, len)
    }

    fn read_str32(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        take_string(self, len)
    }
}

fn take_string<S: Source + ?Sized>(source: &mut S, len: usize) -> Result<String> {
    let bytes = source.read_bytes(len)?;
    String::from_utf8(bytes).map_err(|e| Error::invalid_format("string", e.to_string()))
}

impl<S: Source + ?Sized> Source for &mut S {
    fn take(&mut self, n: usize) -> Result<&[u8]> {
        (**self).take(n)
    }

    fn check_eof(&mut self) -> Result<()> {
        (**self).check_eof()
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        (**self).seek(pos)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_into(buf)
    }

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(n)
    }
}
