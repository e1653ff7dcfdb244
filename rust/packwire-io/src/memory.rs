//! Implementations of the I/O traits for memory buffers.

use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::{Destination, Origin};

impl Destination for Vec<u8> {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// A byte slice reads from its front, shrinking as it goes.
impl Origin for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Read::read(self, buf)
    }
}

impl<T> Origin for Cursor<T>
where
    T: AsRef<[u8]> + Send,
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Read::read(self, buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        Seek::seek(self, pos)
    }
}
