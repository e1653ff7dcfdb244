//! # Packwire: compact binary scalar encoding
//!
//! Packwire serializes scalar values into a dense little-endian byte stream
//! and reads them back. It is the layer below record and file formats: it
//! knows nothing about schemas, framing or checksums, only how each scalar is
//! laid out and how bytes move between buffers and the outside world.
//!
//! ## Encodings
//!
//! * Fixed-width unsigned integers of 8, 16, 24, 32, 48 and 64 bits, and
//!   IEEE-754 floats (bit-exact, including NaN payloads)
//! * Length-prefixed VarInts, single and paired
//! * One-byte forms for small 16-bit values, with an escape to the full value
//! * Booleans, nibbles and small fields packed into single bytes
//! * UTF-8 characters and 8/16/32-bit length-prefixed strings
//!
//! ## Module Organization
//!
//! * [`codec`] - Pure encode/decode functions for every scalar layout
//! * [`common`] - Error and result types shared across components
//! * [`io`] - Destinations and origins: memory, `std::io` adapters and zlib
//! * [`stream`] - Buffered sinks and sources carrying the scalar operations
//!
//! ## Getting Started
//!
//! ```
//! use packwire::stream::{GrowableSink, Sink, SliceSource, Source};
//!
//! let mut sink = GrowableSink::new();
//! sink.write_varint(300).unwrap();
//! sink.write_str8("hello").unwrap();
//!
//! let bytes = sink.into_vec();
//! let mut source = SliceSource::new(&bytes);
//! assert_eq!(source.read_varint().unwrap(), 300);
//! assert_eq!(source.read_str_slice8().unwrap(), "hello");
//! source.check_eof().unwrap();
//! ```
//!
//! Streams over files or sockets are built with
//! [`stream::open_sink`] and [`stream::open_source`], which optionally place
//! zlib compression between the buffer and the underlying writer or reader.

pub use packwire_codec as codec;
pub use packwire_common as common;
pub use packwire_io as io;
pub use packwire_stream as stream;
