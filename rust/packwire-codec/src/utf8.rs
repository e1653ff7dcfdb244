//! UTF-8 code point encoding.
//!
//! The encoder emits standard 1-4 byte sequences. The decoder derives the
//! sequence length from the lead byte alone and accepts 4-byte sequences, so
//! everything the encoder writes can be read back.

use packwire_common::{Result, error::Error};

use crate::Encoded;

/// Substituted for surrogates and values beyond `char::MAX`.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Encodes a code point. Surrogates (`0xD800..=0xDFFF`) and values above
/// `0x10FFFF` are encoded as U+FFFD.
pub fn encode_code_point(cp: u32) -> Encoded<4> {
    encode_char(char::from_u32(cp).unwrap_or(REPLACEMENT))
}

pub fn encode_char(c: char) -> Encoded<4> {
    let mut buf = [0u8; 4];
    let mut out = Encoded::new();
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    out
}

/// Returns the length of the sequence introduced by `lead`.
///
/// * `< 0x80`: 1 byte
/// * bit 5 clear: 2 bytes
/// * bit 4 clear: 3 bytes
/// * otherwise: 4 bytes
#[inline]
pub fn sequence_len(lead: u8) -> usize {
    if lead < 0x80 {
        1
    } else if lead & 0x20 == 0 {
        2
    } else if lead & 0x10 == 0 {
        3
    } else {
        4
    }
}

/// Decodes one complete sequence (as delimited by [`sequence_len`]).
pub fn decode_char(seq: &[u8]) -> Result<char> {
    let s = std::str::from_utf8(seq)?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::invalid_format(
            "utf8",
            format!("expected a single code point, got {} bytes", seq.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_lengths() {
        assert_eq!(encode_code_point(0x41).as_bytes(), b"A");
        assert_eq!(encode_code_point(0x7f).len(), 1);
        assert_eq!(encode_code_point(0x80).len(), 2);
        assert_eq!(encode_code_point(0x7ff).len(), 2);
        assert_eq!(encode_code_point(0x800).len(), 3);
        assert_eq!(encode_code_point(0xffff).len(), 3);
        assert_eq!(encode_code_point(0x10000).len(), 4);
        assert_eq!(encode_code_point(0x10ffff).len(), 4);
    }

    #[test]
    fn test_invalid_code_points_replaced() {
        let replacement = encode_char(REPLACEMENT);
        assert_eq!(encode_code_point(0xd800), replacement);
        assert_eq!(encode_code_point(0xdfff), replacement);
        assert_eq!(encode_code_point(0x110000), replacement);
        assert_eq!(encode_code_point(u32::MAX), replacement);
    }

    #[test]
    fn test_decoder_consumes_every_encoder_output() {
        for cp in [
            0u32, 0x24, 0x7f, 0x80, 0xa2, 0x7ff, 0x800, 0x20ac, 0xfffd, 0xffff, 0x10348, 0x1f600,
            0x10ffff,
        ] {
            let encoded = encode_code_point(cp);
            assert_eq!(sequence_len(encoded[0]), encoded.len(), "cp {cp:#x}");
            assert_eq!(decode_char(&encoded).unwrap() as u32, cp);
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_char(&[0xc3]).is_err());
        assert!(decode_char(&[0xed, 0xa0, 0x80]).is_err());
        assert!(decode_char(b"ab").is_err());
    }
}
