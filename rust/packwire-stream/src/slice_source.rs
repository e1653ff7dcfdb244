//! Zero-copy decoding from a borrowed byte slice.

use std::io::SeekFrom;

use packwire_common::{Result, error::Error, verify_arg};

use crate::Source;

/// A [`Source`] over a byte slice owned by the caller.
///
/// No bytes are copied on construction, and [`read_slice`](Self::read_slice)
/// and the `read_str_slice*` methods return views with the lifetime of the
/// underlying slice rather than of the source, so they stay valid while the
/// source moves on. The owning reads from [`Source`] still copy.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> SliceSource<'a> {
        SliceSource { data, pos: 0 }
    }

    /// Number of bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The unconsumed tail of the slice.
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns a view of the next `n` bytes that aliases the source data.
    pub fn read_slice(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::exhausted(self.pos as u64, n, self.remaining()));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_slice8(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u8()? as usize;
        self.read_slice(len)
    }

    pub fn read_slice16(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u16()? as usize;
        self.read_slice(len)
    }

    pub fn read_slice32(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32()? as usize;
        self.read_slice(len)
    }

    /// Reads an 8-bit length-prefixed string as a view into the source data.
    pub fn read_str_slice8(&mut self) -> Result<&'a str> {
        let bytes = self.read_slice8()?;
        as_str(bytes)
    }

    pub fn read_str_slice16(&mut self) -> Result<&'a str> {
        let bytes = self.read_slice16()?;
        as_str(bytes)
    }

    pub fn read_str_slice32(&mut self) -> Result<&'a str> {
        let bytes = self.read_slice32()?;
        as_str(bytes)
    }
}

fn as_str(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::invalid_format("string", e.to_string()))
}

impl Source for SliceSource<'_> {
    fn take(&mut self, n: usize) -> Result<&[u8]> {
        self.read_slice(n)
    }

    fn check_eof(&mut self) -> Result<()> {
        if self.pos < self.data.len() {
            return Err(Error::not_at_end(self.pos as u64));
        }
        Ok(())
    }

    /// Positions outside `0..=len` are rejected and leave the position
    /// unchanged.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => i128::from(offset),
            SeekFrom::Current(offset) => self.pos as i128 + i128::from(offset),
            SeekFrom::End(offset) => self.data.len() as i128 + i128::from(offset),
        };
        verify_arg!(pos, target >= 0 && target <= self.data.len() as i128);
        self.pos = target as usize;
        Ok(self.pos as u64)
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }
}
