//! Adapters that turn standard `std::io` readers and writers into
//! [`Origin`] and [`Destination`] implementations.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::{Destination, Origin};

/// A [`Destination`] over any `std::io::Write`. Closing flushes the writer.
pub struct WriteDestination<W> {
    inner: W,
}

impl<W> WriteDestination<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns a reference to the underlying writer.
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Consumes the adapter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> Destination for WriteDestination<W> {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.inner.write_all(buf)
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// A sequential, non-seekable [`Origin`] over any `std::io::Read`.
///
/// Interrupted reads are retried here, so callers only ever see data, end of
/// data, or a genuine failure.
pub struct ReadOrigin<R> {
    inner: R,
}

impl<R> ReadOrigin<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Send> Origin for ReadOrigin<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        read_retrying(&mut self.inner, buf)
    }
}

/// An [`Origin`] over a reader that also supports `std::io::Seek`.
pub struct SeekableOrigin<R> {
    inner: R,
}

impl<R> SeekableOrigin<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek + Send> Origin for SeekableOrigin<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        read_retrying(&mut self.inner, buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

pub(crate) fn read_retrying<R: Read + ?Sized>(
    read: &mut R,
    buf: &mut [u8],
) -> std::io::Result<usize> {
    loop {
        match read.read(buf) {
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            r => return r,
        }
    }
}
