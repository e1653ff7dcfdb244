//! Stream construction settings.

use serde::{Deserialize, Serialize};

/// Default size in bytes of sink and source buffers.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Smallest buffer a source is built with.
pub const MIN_BUFFER_SIZE: usize = 16;

/// Settings used by [`open_sink`](crate::open_sink) and
/// [`open_source`](crate::open_source) to build a buffered stream.
///
/// Both sides of a stream must agree on `compression`; `buffer_size` may
/// differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Size in bytes of the sink or source buffer.
    pub buffer_size: usize,

    /// Whether the stream is zlib-compressed, and at which trade-off.
    pub compression: CompressionProfile,
}

impl StreamConfig {
    /// Returns a copy with the given buffer size, raised to
    /// [`MIN_BUFFER_SIZE`] if smaller.
    pub fn with_buffer_size(&self, buffer_size: usize) -> StreamConfig {
        StreamConfig {
            buffer_size: buffer_size.max(MIN_BUFFER_SIZE),
            ..self.clone()
        }
    }

    pub fn with_compression(&self, compression: CompressionProfile) -> StreamConfig {
        StreamConfig {
            compression,
            ..self.clone()
        }
    }

    /// The buffer size actually used, never below the minimum.
    pub fn effective_buffer_size(&self) -> usize {
        self.buffer_size.max(MIN_BUFFER_SIZE)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
            compression: CompressionProfile::default(),
        }
    }
}

/// Represents the desired trade-off for stream compression.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CompressionProfile {
    /// No compression: bytes go to the destination as written.
    Plain,
    /// zlib level 1.
    Fast,
    /// zlib level 6.
    #[default]
    Balanced,
    /// zlib level 9.
    HighCompression,
}

impl CompressionProfile {
    /// The zlib level for this profile, `None` for [`Plain`](Self::Plain).
    pub fn zlib_level(&self) -> Option<u32> {
        match self {
            CompressionProfile::Plain => None,
            CompressionProfile::Fast => Some(1),
            CompressionProfile::Balanced => Some(6),
            CompressionProfile::HighCompression => Some(9),
        }
    }

    pub fn is_compressed(&self) -> bool {
        !matches!(self, CompressionProfile::Plain)
    }
}
