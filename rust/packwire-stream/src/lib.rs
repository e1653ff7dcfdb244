//! Buffered sinks and sources for the packwire scalar encodings.
//!
//! Encoders write scalars through the [`Sink`] trait, decoders read them back
//! through the [`Source`] trait. Both traits carry every scalar operation as a
//! provided method over a single primitive (`put` / `take`), so the four
//! implementations share one byte layout:
//!
//! * [`BoundedSink`]: fixed-capacity buffer flushing into a [`Destination`].
//! * [`GrowableSink`]: in-memory buffer that is itself the result.
//! * [`StreamingSource`]: read-ahead buffer over an [`Origin`].
//! * [`SliceSource`]: zero-copy reader over a borrowed byte slice.
//!
//! [`open_sink`] and [`open_source`] pick the destination/origin stack (plain
//! or zlib-compressed) from a [`StreamConfig`].
//!
//! [`Destination`]: packwire_io::Destination
//! [`Origin`]: packwire_io::Origin

pub mod bounded_sink;
pub mod config;
pub mod growable_sink;
pub mod open;
pub mod sink;
pub mod slice_source;
pub mod source;
pub mod streaming_source;

pub use bounded_sink::BoundedSink;
pub use config::{CompressionProfile, DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE, StreamConfig};
pub use growable_sink::GrowableSink;
pub use open::{open_seekable_source, open_sink, open_source};
pub use sink::Sink;
pub use slice_source::SliceSource;
pub use source::Source;
pub use streaming_source::StreamingSource;

use packwire_common::error::Error;

/// Maps a destination/origin failure into the crate error, keeping
/// "not supported" distinct from genuine I/O faults.
pub(crate) fn io_failure(context: &str, e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::Unsupported {
        Error::unsupported(context)
    } else {
        Error::io(context, e)
    }
}
