//! An in-memory sink whose contents are the product.

use packwire_common::{Result, error::Error};
use packwire_io::Destination;

use crate::Sink;

/// An in-memory sink that grows instead of flushing.
///
/// When a write does not fit, the backing array is reallocated to
/// `max(2 * capacity, len + requested)` bytes and the existing contents are
/// copied forward, so appends are amortized O(1). [`reset`](Self::reset)
/// empties the sink without giving the capacity back.
///
/// `GrowableSink` is also a [`Destination`], so a [`BoundedSink`](crate::BoundedSink)
/// can flush into it.
#[derive(Debug, Default, Clone)]
pub struct GrowableSink {
    buf: Vec<u8>,
}

impl GrowableSink {
    /// Capacity of the first allocation.
    pub const MIN_CAPACITY: usize = 64;

    pub fn new() -> GrowableSink {
        GrowableSink { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> GrowableSink {
        GrowableSink {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// The bytes written so far, viewed as a string.
    pub fn as_str(&self) -> Result<&str> {
        std::str::from_utf8(&self.buf).map_err(|e| Error::invalid_format("sink", e.to_string()))
    }

    /// Sets the length to 0, keeping the allocation for reuse.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    fn append(&mut self, bytes: &[u8]) {
        let required = self.buf.len() + bytes.len();
        if required > self.buf.capacity() {
            let new_capacity = required
                .max(self.buf.capacity() * 2)
                .max(Self::MIN_CAPACITY);
            log::debug!(
                "growing in-memory sink from {} to {} bytes",
                self.buf.capacity(),
                new_capacity
            );
            self.buf.reserve_exact(new_capacity - self.buf.len());
        }
        self.buf.extend_from_slice(bytes);
    }
}

impl Sink for GrowableSink {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.append(bytes);
        Ok(())
    }
}

impl Destination for GrowableSink {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.append(buf);
        Ok(())
    }
}

impl AsRef<[u8]> for GrowableSink {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<GrowableSink> for Vec<u8> {
    fn from(sink: GrowableSink) -> Vec<u8> {
        sink.into_vec()
    }
}
