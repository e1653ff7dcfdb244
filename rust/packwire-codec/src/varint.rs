//! Variable-length integer encodings.
//!
//! # VarInt
//!
//! ```text
//! +--------+---------------------+
//! | len: 1 | value: len bytes LE |
//! +--------+---------------------+
//! ```
//!
//! `len` is the minimal number of bytes holding the value ([`numbytes`]), so
//! zero encodes as the single byte `0x00` and `u64::MAX` as nine bytes.
//!
//! # Paired VarInt
//!
//! Two values share one header byte: the high nibble holds the first value's
//! length, the low nibble the second's. The payloads follow in order.
//!
//! # Short VarInt16 and biased Int16
//!
//! Single-byte forms for values that are usually small, escaping to
//! [`SENTINEL`] followed by the full little-endian 16-bit value otherwise.

use packwire_common::{Result, verify_data};

use crate::{
    Encoded,
    fixed::{decode_uint, encode_u16, encode_uint},
};

/// Maximum payload length of a single VarInt.
pub const MAX_VARINT_LEN: usize = 8;

/// Escape byte of the short 16-bit forms.
pub const SENTINEL: u8 = 255;

/// Bias added to a short-form signed 16-bit value.
pub const INT16_BIAS: i16 = 127;

/// Returns the minimal number of bytes needed to represent `v` (0 through 8).
#[inline]
pub fn numbytes(v: u64) -> u8 {
    ((u64::BITS - v.leading_zeros()).div_ceil(8)) as u8
}

/// Encodes a single VarInt: one length byte followed by the payload.
pub fn encode_varint(v: u64) -> Encoded<9> {
    let len = numbytes(v) as usize;
    let mut out = Encoded::new();
    out.push(len as u8);
    let mut payload = [0u8; MAX_VARINT_LEN];
    encode_uint(v, &mut payload[..len]);
    out.extend_from_slice(&payload[..len]);
    out
}

/// Encodes two VarInts behind a shared length header.
pub fn encode_varint_pair(v1: u64, v2: u64) -> Encoded<17> {
    let len1 = numbytes(v1) as usize;
    let len2 = numbytes(v2) as usize;
    let mut out = Encoded::new();
    out.push(((len1 as u8) << 4) | len2 as u8);
    let mut payload = [0u8; MAX_VARINT_LEN];
    encode_uint(v1, &mut payload[..len1]);
    out.extend_from_slice(&payload[..len1]);
    encode_uint(v2, &mut payload[..len2]);
    out.extend_from_slice(&payload[..len2]);
    out
}

/// Validates a VarInt length byte and returns the payload length.
#[inline]
pub fn varint_len(header: u8) -> Result<usize> {
    verify_data!(header, header as usize <= MAX_VARINT_LEN);
    Ok(header as usize)
}

/// Splits a paired VarInt header into the two payload lengths.
#[inline]
pub fn varint_pair_lens(header: u8) -> Result<(usize, usize)> {
    let len1 = (header >> 4) as usize;
    let len2 = (header & 0x0f) as usize;
    verify_data!(header, len1 <= MAX_VARINT_LEN && len2 <= MAX_VARINT_LEN);
    Ok((len1, len2))
}

/// Decodes a VarInt payload whose length was given by the header byte.
#[inline]
pub fn decode_varint_payload(payload: &[u8]) -> u64 {
    decode_uint(payload)
}

/// Encodes a 16-bit value as one byte when it is below [`SENTINEL`], or as the
/// sentinel followed by the full little-endian value.
pub fn encode_short_u16(v: u16) -> Encoded<3> {
    let mut out = Encoded::new();
    if v < SENTINEL as u16 {
        out.push(v as u8);
    } else {
        out.push(SENTINEL);
        out.extend_from_slice(&encode_u16(v));
    }
    out
}

/// Interprets the first byte of a short 16-bit value. `None` means the full
/// value follows as a little-endian `u16`.
#[inline]
pub fn decode_short_u16_head(head: u8) -> Option<u16> {
    (head < SENTINEL).then_some(head as u16)
}

/// Encodes a signed 16-bit value. Values in `-127..=127` take one byte
/// (`value + 127`); everything else, including `-128` and `128`, takes the
/// sentinel followed by the two's-complement value.
pub fn encode_biased_i16(v: i16) -> Encoded<3> {
    let mut out = Encoded::new();
    if v > -128 && v < 128 {
        out.push((v + INT16_BIAS) as u8);
    } else {
        out.push(SENTINEL);
        out.extend_from_slice(&encode_u16(v as u16));
    }
    out
}

/// Interprets the first byte of a biased signed 16-bit value. `None` means the
/// full value follows as a little-endian `i16`.
#[inline]
pub fn decode_biased_i16_head(head: u8) -> Option<i16> {
    (head < SENTINEL).then(|| head as i16 - INT16_BIAS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::decode_u16;

    fn decode_varint(buf: &[u8]) -> u64 {
        let len = varint_len(buf[0]).unwrap();
        assert_eq!(buf.len(), len + 1);
        decode_varint_payload(&buf[1..])
    }

    fn decode_pair(buf: &[u8]) -> (u64, u64) {
        let (len1, len2) = varint_pair_lens(buf[0]).unwrap();
        assert_eq!(buf.len(), 1 + len1 + len2);
        (
            decode_varint_payload(&buf[1..1 + len1]),
            decode_varint_payload(&buf[1 + len1..]),
        )
    }

    #[test]
    fn test_numbytes() {
        assert_eq!(numbytes(0), 0);
        assert_eq!(numbytes(1), 1);
        assert_eq!(numbytes(255), 1);
        assert_eq!(numbytes(256), 2);
        assert_eq!(numbytes(65535), 2);
        assert_eq!(numbytes(65536), 3);
        assert_eq!(numbytes((1 << 48) - 1), 6);
        assert_eq!(numbytes(1 << 48), 7);
        assert_eq!(numbytes(u64::MAX), 8);
        for shift in 0..64 {
            let v = 1u64 << shift;
            assert_eq!(numbytes(v) as u32, shift / 8 + 1);
        }
    }

    #[test]
    fn test_varint_round_trip() {
        let values = [
            0u64,
            1,
            255,
            256,
            65535,
            65536,
            u32::MAX as u64,
            u32::MAX as u64 + 1,
            u64::MAX,
        ];
        for v in values {
            let encoded = encode_varint(v);
            assert_eq!(encoded.len(), 1 + numbytes(v) as usize);
            assert_eq!(decode_varint(&encoded), v);
        }
        assert_eq!(encode_varint(0).as_bytes(), &[0]);
        assert_eq!(encode_varint(256).as_bytes(), &[2, 0, 1]);
    }

    #[test]
    fn test_varint_full_width_byte_order() {
        let v = 0x8877_6655_4433_2211u64;
        let encoded = encode_varint(v);
        assert_eq!(
            encoded.as_bytes(),
            &[8, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]
        );
        let decoded = decode_varint(&encoded);
        assert_eq!(decoded, v);

        // Reconstructing byte 3 with a 25-bit shift (a known defect in an older
        // reader) yields a different value for the same bytes; data written by
        // any encoder decodes correctly only with the 24-bit shift used here.
        let p = &encoded[1..];
        let shifted = (p[0] as u64)
            | (p[1] as u64) << 8
            | (p[2] as u64) << 16
            | (p[3] as u64) << 25
            | (p[4] as u64) << 32
            | (p[5] as u64) << 40
            | (p[6] as u64) << 48
            | (p[7] as u64) << 56;
        assert_ne!(shifted, decoded);
    }

    #[test]
    fn test_varint_rejects_long_header() {
        assert!(varint_len(9).is_err());
        assert!(varint_pair_lens(0x90).is_err());
        assert!(varint_pair_lens(0x09).is_err());
        assert_eq!(varint_pair_lens(0x88).unwrap(), (8, 8));
    }

    #[test]
    fn test_varint_pair() {
        let encoded = encode_varint_pair(0, u64::MAX);
        assert_eq!(encoded[0], 0x08);
        assert_eq!(decode_pair(&encoded), (0, u64::MAX));

        let encoded = encode_varint_pair(u64::MAX, 0);
        assert_eq!(encoded[0], 0x80);
        assert_eq!(decode_pair(&encoded), (u64::MAX, 0));

        fastrand::seed(1209384);
        for _ in 0..1000 {
            let v1 = fastrand::u64(..) >> fastrand::u32(0..64);
            let v2 = fastrand::u64(..) >> fastrand::u32(0..64);
            assert_eq!(decode_pair(&encode_varint_pair(v1, v2)), (v1, v2));
        }
    }

    #[test]
    fn test_short_u16() {
        assert_eq!(encode_short_u16(0).as_bytes(), &[0]);
        assert_eq!(encode_short_u16(254).as_bytes(), &[254]);
        assert_eq!(encode_short_u16(255).as_bytes(), &[255, 255, 0]);
        assert_eq!(encode_short_u16(65535).as_bytes(), &[255, 255, 255]);

        for v in [0u16, 1, 254, 255, 256, 1000, 65535] {
            let encoded = encode_short_u16(v);
            let decoded =
                decode_short_u16_head(encoded[0]).unwrap_or_else(|| decode_u16(&encoded[1..]));
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn test_biased_i16_boundaries() {
        assert_eq!(encode_biased_i16(0).as_bytes(), &[127]);
        assert_eq!(encode_biased_i16(127).as_bytes(), &[254]);
        assert_eq!(encode_biased_i16(-127).as_bytes(), &[0]);
        assert_eq!(encode_biased_i16(128).as_bytes(), &[255, 128, 0]);
        assert_eq!(encode_biased_i16(-128).as_bytes(), &[255, 0x80, 0xff]);
        assert_eq!(encode_biased_i16(-129).as_bytes(), &[255, 0x7f, 0xff]);

        for v in i16::MIN..=i16::MAX {
            let encoded = encode_biased_i16(v);
            assert_eq!(encoded.len() == 1, (-127..=127).contains(&v));
            let decoded = decode_biased_i16_head(encoded[0])
                .unwrap_or_else(|| decode_u16(&encoded[1..]) as i16);
            assert_eq!(decoded, v);
        }
    }
}
