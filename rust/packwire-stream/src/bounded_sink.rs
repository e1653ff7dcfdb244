//! A fixed-capacity sink that flushes into a [`Destination`].

use packwire_common::{Result, error::Error};
use packwire_io::Destination;

use crate::{Sink, config::DEFAULT_BUFFER_SIZE, io_failure};

/// A fixed-capacity byte buffer in front of a [`Destination`].
///
/// Writes accumulate in one backing array allocated at construction. When an
/// incoming write would overflow it, the buffered bytes are flushed to the
/// destination first and the write lands at the start of the now empty
/// buffer. A write larger than the whole buffer bypasses it and goes straight
/// to the destination, after the buffered bytes.
///
/// The sink is finalized by [`close`](Sink::close), which flushes and closes
/// the destination. A sink dropped without `close` is finalized by `Drop`;
/// failures at that point can only be logged, so call `close` explicitly
/// whenever the outcome matters.
pub struct BoundedSink<D: Destination> {
    buf: Box<[u8]>,
    pos: usize,
    dest: D,
    closed: bool,
}

impl<D: Destination> BoundedSink<D> {
    /// Creates a sink with a buffer of `capacity` bytes (at least 1).
    pub fn new(dest: D, capacity: usize) -> BoundedSink<D> {
        BoundedSink {
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
            pos: 0,
            dest,
            closed: false,
        }
    }

    pub fn with_default_capacity(dest: D) -> BoundedSink<D> {
        Self::new(dest, DEFAULT_BUFFER_SIZE)
    }

    /// Size of the backing array.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes written but not yet flushed.
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.pos
    }

    /// Bytes written but not yet flushed.
    pub fn buffered(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn destination(&self) -> &D {
        &self.dest
    }

    pub fn destination_mut(&mut self) -> &mut D {
        &mut self.dest
    }

    /// Rebinds the sink to `dest`, reusing the backing array, and returns the
    /// previous destination.
    ///
    /// The cursor is reset to 0: bytes still buffered for the previous
    /// destination are discarded, so [`flush`](Sink::flush) first if they are
    /// meant to reach it. The previous destination is not closed.
    pub fn recycle(&mut self, dest: D) -> D {
        if self.pos > 0 {
            log::debug!("recycling sink, discarding {} buffered bytes", self.pos);
        }
        self.pos = 0;
        self.closed = false;
        std::mem::replace(&mut self.dest, dest)
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if self.pos == 0 {
            return Ok(());
        }
        log::trace!("flushing {} buffered bytes", self.pos);
        self.dest
            .write_all(&self.buf[..self.pos])
            .map_err(|e| io_failure("flush", e))?;
        self.pos = 0;
        Ok(())
    }
}

impl<D: Destination> Sink for BoundedSink<D> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        if self.closed {
            return Err(Error::unsupported("write to a closed sink"));
        }
        if self.pos + bytes.len() > self.buf.len() {
            self.flush_buffer()?;
            if bytes.len() > self.buf.len() {
                log::trace!("writing {} bytes past the buffer", bytes.len());
                return self
                    .dest
                    .write_all(bytes)
                    .map_err(|e| io_failure("write", e));
            }
        }
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_buffer()
    }

    /// Flushes the buffer, then closes the destination. The first error wins;
    /// the destination is closed even if the flush failed.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let flushed = self.flush_buffer();
        let closed = self.dest.close().map_err(|e| io_failure("close", e));
        flushed.and(closed)
    }
}

impl<D: Destination> Drop for BoundedSink<D> {
    fn drop(&mut self) {
        if !self.closed
            && let Err(e) = self.close()
        {
            log::warn!("failed to finalize a dropped sink: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use packwire_common::error::ErrorKind;
    use packwire_io::Destination;

    use super::BoundedSink;
    use crate::Sink;

    /// Records every `write_all` call separately.
    #[derive(Clone, Default)]
    struct Recorder {
        writes: Arc<Mutex<Vec<Vec<u8>>>>,
        closes: Arc<Mutex<usize>>,
    }

    impl Recorder {
        fn writes(&self) -> Vec<Vec<u8>> {
            self.writes.lock().unwrap().clone()
        }

        fn closes(&self) -> usize {
            *self.closes.lock().unwrap()
        }
    }

    impl Destination for Recorder {
        fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
            self.writes.lock().unwrap().push(buf.to_vec());
            Ok(())
        }

        fn close(&mut self) -> std::io::Result<()> {
            *self.closes.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct Failing;

    impl Destination for Failing {
        fn write_all(&mut self, _buf: &[u8]) -> std::io::Result<()> {
            Err(std::io::Error::other("device full"))
        }

        fn close(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("close failed"))
        }
    }

    #[test]
    fn test_exact_capacity_does_not_flush() {
        let recorder = Recorder::default();
        let mut sink = BoundedSink::new(recorder.clone(), 8);
        sink.write_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert!(recorder.writes().is_empty());
        assert_eq!(sink.buffered_len(), 8);

        sink.write_u8(9).unwrap();
        assert_eq!(recorder.writes(), vec![vec![1, 2, 3, 4, 5, 6, 7, 8]]);
        assert_eq!(sink.buffered(), &[9]);

        sink.close().unwrap();
        assert_eq!(
            recorder.writes(),
            vec![vec![1, 2, 3, 4, 5, 6, 7, 8], vec![9]]
        );
        assert_eq!(recorder.closes(), 1);
    }

    #[test]
    fn test_overflowing_write_flushes_once() {
        let recorder = Recorder::default();
        let mut sink = BoundedSink::new(recorder.clone(), 8);
        sink.write_u32(0x04030201).unwrap();
        sink.write_u8(5).unwrap();
        assert!(recorder.writes().is_empty());

        // 5 + 4 > 8: the prior contents go out, the new frame is buffered whole.
        sink.write_u32(0x09080706).unwrap();
        assert_eq!(recorder.writes(), vec![vec![1, 2, 3, 4, 5]]);
        assert_eq!(sink.buffered(), &[6, 7, 8, 9]);

        // A 9-byte frame (full-width VarInt) is larger than the whole buffer.
        sink.write_varint(u64::MAX).unwrap();
        let writes = recorder.writes();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[1], vec![6, 7, 8, 9]);
        assert_eq!(writes[2], vec![8, 255, 255, 255, 255, 255, 255, 255, 255]);
        assert_eq!(sink.buffered_len(), 0);
    }

    #[test]
    fn test_oversized_write_goes_direct() {
        let recorder = Recorder::default();
        let mut sink = BoundedSink::new(recorder.clone(), 4);
        sink.write_u8(0xaa).unwrap();
        sink.write_bytes(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(recorder.writes(), vec![vec![0xaa], vec![1, 2, 3, 4, 5, 6]]);
        assert_eq!(sink.buffered_len(), 0);
    }

    #[test]
    fn test_drop_flushes_and_closes() {
        let recorder = Recorder::default();
        {
            let mut sink = BoundedSink::new(recorder.clone(), 64);
            sink.write_str8("residue").unwrap();
        }
        assert_eq!(recorder.writes(), vec![b"\x07residue".to_vec()]);
        assert_eq!(recorder.closes(), 1);
    }

    #[test]
    fn test_close_is_idempotent_and_blocks_writes() {
        let recorder = Recorder::default();
        let mut sink = BoundedSink::new(recorder.clone(), 16);
        sink.write_u16(7).unwrap();
        sink.close().unwrap();
        sink.close().unwrap();
        assert_eq!(recorder.closes(), 1);
        let err = sink.write_u8(1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_destination_errors_propagate() {
        let mut sink = BoundedSink::new(Failing, 4);
        sink.write_u32(1).unwrap();
        let err = sink.write_u8(2).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OriginFailure { .. }));

        // The flush error is reported before the close error.
        let err = sink.close().unwrap_err();
        match err.kind() {
            ErrorKind::OriginFailure { context, source } => {
                assert_eq!(context, "flush");
                assert_eq!(source.to_string(), "device full");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_recycle_reuses_buffer() {
        let first = Recorder::default();
        let second = Recorder::default();
        let mut sink = BoundedSink::new(first.clone(), 32);
        sink.write_u8(1).unwrap();
        sink.flush().unwrap();
        sink.write_u8(2).unwrap();

        let previous = sink.recycle(second.clone());
        assert_eq!(previous.writes(), vec![vec![1]]);
        assert_eq!(sink.buffered_len(), 0);
        assert_eq!(sink.capacity(), 32);

        sink.write_u8(3).unwrap();
        sink.close().unwrap();
        assert_eq!(second.writes(), vec![vec![3]]);
        assert_eq!(first.closes(), 0);
    }

    #[test]
    fn test_string_truncation() {
        let mut out = Vec::new();
        {
            let mut sink = BoundedSink::new(&mut out, 1024);
            sink.write_str8(&"x".repeat(300)).unwrap();
            sink.write_bytes16(&[0u8; 10]).unwrap();
            sink.close().unwrap();
        }
        assert_eq!(out[0], 255);
        assert_eq!(out.len(), 1 + 255 + 2 + 10);
        assert_eq!(&out[256..258], &[10, 0]);
    }

    #[test]
    fn test_bytes16_truncation() {
        let mut out = Vec::new();
        {
            let mut sink = BoundedSink::new(&mut out, 1024);
            sink.write_bytes16(&vec![7u8; 65_536]).unwrap();
            sink.write_str16(&"y".repeat(65_535)).unwrap();
            sink.close().unwrap();
        }
        assert_eq!(out.len(), 2 * (2 + 65_535));
        assert_eq!(&out[..2], &[0xff, 0xff]);
        assert!(out[2..65_537].iter().all(|&b| b == 7));
        // A string exactly at the limit is kept whole.
        assert_eq!(&out[65_537..65_539], &[0xff, 0xff]);
        assert!(out[65_539..].iter().all(|&b| b == b'y'));
    }
}
