//! zlib (DEFLATE) wrappers, treated as opaque byte transforms.

use std::io::{Read, Write};

use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};

use crate::{Destination, Origin, adapters::read_retrying};

/// A [`Destination`] that compresses everything written to it.
///
/// `close()` writes the zlib trailer and flushes the underlying writer; the
/// stream is not decodable until then.
pub struct ZlibDestination<W: Write> {
    encoder: ZlibEncoder<W>,
}

impl<W: Write> ZlibDestination<W> {
    /// Creates a compressing destination with the given zlib level (0-9).
    pub fn new(inner: W, level: u32) -> Self {
        Self {
            encoder: ZlibEncoder::new(inner, Compression::new(level.min(9))),
        }
    }

    /// Total number of uncompressed bytes accepted so far.
    pub fn total_in(&self) -> u64 {
        self.encoder.total_in()
    }

    /// Returns a reference to the underlying writer.
    pub fn inner(&self) -> &W {
        self.encoder.get_ref()
    }

    /// Finishes the compressed stream and returns the underlying writer.
    pub fn finish(self) -> std::io::Result<W> {
        self.encoder.finish()
    }
}

impl<W: Write + Send> Destination for ZlibDestination<W> {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.encoder.write_all(buf)
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.encoder.try_finish()?;
        self.encoder.get_mut().flush()
    }
}

/// An [`Origin`] that inflates a zlib stream read from the underlying reader.
pub struct ZlibOrigin<R: Read> {
    decoder: ZlibDecoder<R>,
}

impl<R: Read> ZlibOrigin<R> {
    pub fn new(inner: R) -> Self {
        Self {
            decoder: ZlibDecoder::new(inner),
        }
    }

    /// Total number of decompressed bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.decoder.total_out()
    }

    pub fn into_inner(self) -> R {
        self.decoder.into_inner()
    }
}

impl<R: Read + Send> Origin for ZlibOrigin<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        read_retrying(&mut self.decoder, buf)
    }
}
