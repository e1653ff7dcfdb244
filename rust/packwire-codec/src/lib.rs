//! Bit-exact scalar encodings shared by every packwire sink and source.
//!
//! All functions here are pure: they map a value to a short byte sequence (or
//! a byte sequence back to a value) without touching any buffer or I/O handle.
//! Multi-byte integers are little-endian throughout.
//!
//! - [`fixed`]: 8/16/24/32/48/64-bit integers and IEEE-754 floats.
//! - [`varint`]: the self-describing variable-length integer family.
//! - [`packing`]: booleans, nibbles and small enumerations packed into single bytes.
//! - [`utf8`]: code point encoding and decoding.

pub mod encoded;
pub mod fixed;
pub mod packing;
pub mod utf8;
pub mod varint;

pub use encoded::Encoded;
pub use packing::{SpecialA, SpecialB};
pub use varint::numbytes;
