//! gzip body encoding for framed responses.

use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Value of `stream.compression` for gzip bodies.
pub const GZIP: &str = "gzip";

/// Value of `stream.format` for JSON bodies.
pub const JSON: &str = "json";

/// Compress `bytes` with gzip at the default level.
pub fn gzip(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Decompress a gzip body.
pub fn gunzip(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
