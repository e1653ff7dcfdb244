//! A read-ahead source over an [`Origin`].

use std::io::SeekFrom;

use packwire_common::{Result, error::Error};
use packwire_io::Origin;

use crate::{
    Source,
    config::{DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE},
    io_failure,
};

/// A buffered [`Source`] pulling from an [`Origin`], such as a file or a
/// decompression stream.
///
/// The source keeps `n` unconsumed bytes (the residue) at offset `at` of its
/// backing array. A request for `k > n` bytes moves the residue to offset 0
/// and reads from the origin into the free tail of the array until at least
/// `k` bytes are buffered; the origin is never asked for data before it is
/// needed.
///
/// Owning reads ([`read_bytes`](Source::read_bytes),
/// [`read_into`](Source::read_into) and the string readers) larger than the
/// array are copied out chunk by chunk and never grow it, so a corrupt length
/// prefix costs no more memory than the origin actually delivers. Bytes
/// consumed by such a read before the origin runs dry are not restored.
/// A [`take`](Source::take) larger than the array grows it, but only once the
/// array is full of delivered bytes.
///
/// Views returned by `take` point into the backing array and are overwritten
/// by the next refill.
pub struct StreamingSource<O> {
    origin: O,
    buf: Box<[u8]>,
    /// Offset of the residue in `buf`.
    at: usize,
    /// Length of the residue.
    n: usize,
    position: u64,
}

impl<O: Origin> StreamingSource<O> {
    pub fn new(origin: O, buffer_size: usize) -> StreamingSource<O> {
        StreamingSource {
            origin,
            buf: vec![0u8; buffer_size.max(MIN_BUFFER_SIZE)].into_boxed_slice(),
            at: 0,
            n: 0,
            position: 0,
        }
    }

    pub fn with_default_buffer(origin: O) -> StreamingSource<O> {
        Self::new(origin, DEFAULT_BUFFER_SIZE)
    }

    /// Size of the backing array.
    pub fn buffer_size(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes pulled from the origin but not yet consumed.
    pub fn buffered_len(&self) -> usize {
        self.n
    }

    pub fn origin(&self) -> &O {
        &self.origin
    }

    /// Consumes the source and returns the origin. Buffered bytes are lost.
    pub fn into_inner(self) -> O {
        self.origin
    }

    /// Reads once from the origin into `buf[start..]`, retrying interrupted
    /// reads. `Ok(0)` is end of data.
    fn read_origin(&mut self, start: usize) -> Result<usize> {
        loop {
            match self.origin.read(&mut self.buf[start..]) {
                Ok(m) => {
                    if m > 0 {
                        log::trace!("pulled {m} bytes from origin");
                    }
                    return Ok(m);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(io_failure("read", e)),
            }
        }
    }

    /// Ensures at least `k` bytes are buffered.
    fn fill(&mut self, k: usize) -> Result<()> {
        if self.n >= k {
            return Ok(());
        }
        self.buf.copy_within(self.at..self.at + self.n, 0);
        self.at = 0;

        while self.n < k {
            if self.n == self.buf.len() {
                self.grow(k);
            }
            match self.read_origin(self.n)? {
                0 => return Err(Error::exhausted(self.position, k, self.n)),
                m => self.n += m,
            }
        }
        Ok(())
    }

    /// Doubles the array, capped at `k`. Only called with a full array and
    /// the residue at offset 0.
    fn grow(&mut self, k: usize) {
        let new_size = k.min(self.buf.len() * 2);
        log::debug!(
            "growing read buffer from {} to {} bytes",
            self.buf.len(),
            new_size
        );
        let mut buf = vec![0u8; new_size].into_boxed_slice();
        buf[..self.n].copy_from_slice(&self.buf[..self.n]);
        self.buf = buf;
    }

    /// Hands the next `len` bytes to `emit` in buffer-sized chunks without
    /// growing the array.
    fn copy_out(&mut self, len: usize, mut emit: impl FnMut(&[u8])) -> Result<()> {
        let offset = self.position;
        let mut copied = 0;
        while copied < len {
            if self.n == 0 {
                self.at = 0;
                match self.read_origin(0)? {
                    0 => return Err(Error::exhausted(offset, len, copied)),
                    m => self.n = m,
                }
            }
            let m = self.n.min(len - copied);
            emit(&self.buf[self.at..self.at + m]);
            self.at += m;
            self.n -= m;
            self.position += m as u64;
            copied += m;
        }
        Ok(())
    }
}

impl<O: Origin> Source for StreamingSource<O> {
    fn take(&mut self, n: usize) -> Result<&[u8]> {
        self.fill(n)?;
        let start = self.at;
        self.at += n;
        self.n -= n;
        self.position += n as u64;
        Ok(&self.buf[start..start + n])
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() <= self.buf.len() {
            buf.copy_from_slice(self.take(buf.len())?);
            return Ok(());
        }
        let mut filled = 0;
        self.copy_out(buf.len(), |chunk| {
            buf[filled..filled + chunk.len()].copy_from_slice(chunk);
            filled += chunk.len();
        })
    }

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        if n <= self.buf.len() {
            return Ok(self.take(n)?.to_vec());
        }
        let mut out = Vec::new();
        self.copy_out(n, |chunk| out.extend_from_slice(chunk))?;
        Ok(out)
    }

    /// Treats a zero-length origin read as end of data. Bytes read while
    /// checking are kept as residue, not consumed.
    fn check_eof(&mut self) -> Result<()> {
        if self.n > 0 {
            return Err(Error::not_at_end(self.position));
        }
        self.at = 0;
        match self.read_origin(0)? {
            0 => Ok(()),
            m => {
                self.n = m;
                Err(Error::not_at_end(self.position))
            }
        }
    }

    /// Seeks the origin and discards the residue. `SeekFrom::Current` is
    /// relative to the logical position, not to how far the origin has been
    /// read ahead.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let pos = match pos {
            SeekFrom::Current(offset) => {
                let offset = offset
                    .checked_sub(self.n as i64)
                    .ok_or_else(|| Error::invalid_arg("pos", "relative offset out of range"))?;
                SeekFrom::Current(offset)
            }
            pos => pos,
        };
        let new_pos = self.origin.seek(pos).map_err(|e| io_failure("seek", e))?;
        self.at = 0;
        self.n = 0;
        self.position = new_pos;
        Ok(new_pos)
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn close(&mut self) -> Result<()> {
        self.origin.close().map_err(|e| io_failure("close", e))
    }
}
