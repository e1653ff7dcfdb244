//! Builds buffered sinks and sources over `std::io` readers and writers.

use std::io::{Read, Seek, Write};

use packwire_io::{
    Destination, Origin, ReadOrigin, SeekableOrigin, WriteDestination, ZlibDestination, ZlibOrigin,
};

use crate::{BoundedSink, StreamConfig, StreamingSource};

/// Opens a sink writing to `writer`, compressed according to
/// `config.compression`.
///
/// The stream is complete only after [`close`](crate::Sink::close), which
/// also writes the zlib trailer when compression is on.
pub fn open_sink<'a, W>(writer: W, config: &StreamConfig) -> BoundedSink<Box<dyn Destination + 'a>>
where
    W: Write + Send + 'a,
{
    let dest: Box<dyn Destination + 'a> = match config.compression.zlib_level() {
        Some(level) => Box::new(ZlibDestination::new(writer, level)),
        None => Box::new(WriteDestination::new(writer)),
    };
    log::debug!(
        "opening sink: buffer {} bytes, compression {:?}",
        config.effective_buffer_size(),
        config.compression
    );
    BoundedSink::new(dest, config.effective_buffer_size())
}

/// Opens a sequential source reading from `reader`. The configured
/// compression must match the one the stream was written with.
pub fn open_source<'a, R>(reader: R, config: &StreamConfig) -> StreamingSource<Box<dyn Origin + 'a>>
where
    R: Read + Send + 'a,
{
    let origin: Box<dyn Origin + 'a> = if config.compression.is_compressed() {
        Box::new(ZlibOrigin::new(reader))
    } else {
        Box::new(ReadOrigin::new(reader))
    };
    StreamingSource::new(origin, config.effective_buffer_size())
}

/// Like [`open_source`], but keeps random access for uncompressed streams.
/// Compressed streams can only be read sequentially; seeking them fails with
/// `UnsupportedOperation`.
pub fn open_seekable_source<'a, R>(
    reader: R,
    config: &StreamConfig,
) -> StreamingSource<Box<dyn Origin + 'a>>
where
    R: Read + Seek + Send + 'a,
{
    let origin: Box<dyn Origin + 'a> = if config.compression.is_compressed() {
        Box::new(ZlibOrigin::new(reader))
    } else {
        Box::new(SeekableOrigin::new(reader))
    };
    StreamingSource::new(origin, config.effective_buffer_size())
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, SeekFrom};

    use packwire_common::error::ErrorKind;

    use super::{open_seekable_source, open_sink, open_source};
    use crate::{CompressionProfile, Sink, Source, StreamConfig};

    fn write_sample(config: &StreamConfig) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut sink = open_sink(&mut out, config);
            for i in 0..1000u32 {
                sink.write_varint(u64::from(i) * 1000).unwrap();
                sink.write_str8("sample").unwrap();
            }
            sink.close().unwrap();
        }
        out
    }

    fn check_sample(source: &mut impl Source) {
        for i in 0..1000u32 {
            assert_eq!(source.read_varint().unwrap(), u64::from(i) * 1000);
            assert_eq!(source.read_str8().unwrap(), "sample");
        }
        source.check_eof().unwrap();
    }

    #[test]
    fn test_plain_round_trip() {
        let config = StreamConfig::default()
            .with_compression(CompressionProfile::Plain)
            .with_buffer_size(100);
        let bytes = write_sample(&config);
        let mut source = open_source(bytes.as_slice(), &config);
        check_sample(&mut source);
    }

    #[test]
    fn test_compressed_round_trip() {
        let plain =
            write_sample(&StreamConfig::default().with_compression(CompressionProfile::Plain));
        for profile in [
            CompressionProfile::Fast,
            CompressionProfile::Balanced,
            CompressionProfile::HighCompression,
        ] {
            let config = StreamConfig::default()
                .with_compression(profile)
                .with_buffer_size(64);
            let bytes = write_sample(&config);
            assert!(bytes.len() < plain.len());
            let mut source = open_source(bytes.as_slice(), &config);
            check_sample(&mut source);
        }
    }

    #[test]
    fn test_seekable_source() {
        let config = StreamConfig::default().with_compression(CompressionProfile::Plain);
        let bytes = write_sample(&config);
        let mut source = open_seekable_source(Cursor::new(bytes), &config);
        // The first record is a 1-byte VarInt (zero) and a 7-byte string.
        source.seek(SeekFrom::Start(1)).unwrap();
        assert_eq!(source.read_str8().unwrap(), "sample");
        assert_eq!(source.read_varint().unwrap(), 1000);
    }

    #[test]
    fn test_compressed_source_cannot_seek() {
        let config = StreamConfig::default();
        let bytes = write_sample(&config);
        let mut source = open_seekable_source(Cursor::new(bytes), &config);
        assert_eq!(source.read_varint().unwrap(), 0);
        let err = source.seek(SeekFrom::Start(0)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedOperation { .. }));
    }
}
