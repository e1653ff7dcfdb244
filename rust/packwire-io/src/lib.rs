//! I/O abstractions underneath packwire sinks and sources:
//! - `Destination`: sequential byte consumer with an optional `close()` operation.
//! - `Origin`: sequential byte producer with optional random access and `close()`.
//!
//! Provides implementations for memory buffers, `std::io` readers/writers and
//! zlib-compressed streams.

use std::io::SeekFrom;

pub mod adapters;
pub mod memory;
pub mod zlib;

pub use adapters::{ReadOrigin, SeekableOrigin, WriteDestination};
pub use zlib::{ZlibDestination, ZlibOrigin};

/// A write-only byte channel that a buffered sink flushes into.
///
/// Implementations must be [`Send`] so that a sink can be moved between
/// threads; a single destination is never written concurrently.
pub trait Destination: Send {
    /// Writes the entire buffer, appending it to any previously written data.
    ///
    /// **NOTE**: `write_all` must not return with a short write. Either all bytes
    /// are accepted, or an error is returned.
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;

    /// Finalizes the destination, committing any state it buffers itself
    /// (e.g. the trailer of a compressed stream).
    ///
    /// Destinations without a close operation keep the default, which does
    /// nothing. Writing after `close` may fail.
    fn close(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A read-only byte channel that a buffered source pulls from.
pub trait Origin: Send {
    /// Reads up to `buf.len()` bytes, returning how many were read.
    ///
    /// `Ok(0)` for a non-empty `buf` signals end of data. A short read is not
    /// an error; callers loop until they have what they need.
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;

    /// Repositions the origin and returns the new absolute position.
    ///
    /// Only origins with random access override this; the default fails with
    /// [`std::io::ErrorKind::Unsupported`].
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let _ = pos;
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "origin does not support seek",
        ))
    }

    /// Releases the origin. The default does nothing.
    fn close(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<T> Destination for Box<T>
where
    T: Destination + ?Sized,
{
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.as_mut().write_all(buf)
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.as_mut().close()
    }
}

impl<T> Destination for &mut T
where
    T: Destination + ?Sized,
{
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        (**self).write_all(buf)
    }

    fn close(&mut self) -> std::io::Result<()> {
        (**self).close()
    }
}

impl<T> Origin for Box<T>
where
    T: Origin + ?Sized,
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.as_mut().read(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.as_mut().seek(pos)
    }

    fn close(&mut self) -> std::io::Result<()> {
        self.as_mut().close()
    }
}

impl<T> Origin for &mut T
where
    T: Origin + ?Sized,
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        (**self).read(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        (**self).seek(pos)
    }

    fn close(&mut self) -> std::io::Result<()> {
        (**self).close()
    }
}
