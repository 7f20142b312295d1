//! Bounded, positioned reads from a log file.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Source of byte chunks addressed by absolute position.
///
/// Callers clamp `position + len` to [`ChunkSource::size`]; implementations
/// treat a short read as an error.
pub trait ChunkSource {
    /// Total size in bytes, captured when the source was opened.
    fn size(&self) -> u64;

    /// Read exactly `len` bytes starting at `position`.
    fn read_chunk(&mut self, position: u64, len: usize) -> io::Result<Vec<u8>>;
}

/// [`ChunkSource`] over any seekable reader.
#[derive(Debug)]
pub struct SeekChunkSource<R> {
    inner: R,
    size: u64,
}

/// A chunk source backed by an open log file.
pub type FileChunkSource = SeekChunkSource<File>;

impl FileChunkSource {
    /// Open `path` read-only and record its current size.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        Ok(Self { inner: file, size })
    }
}

impl<R: Read + Seek> SeekChunkSource<R> {
    /// Wrap a reader, measuring its size by seeking to the end.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let size = inner.seek(SeekFrom::End(0))?;
        Ok(Self { inner, size })
    }
}

impl<R: Read + Seek> ChunkSource for SeekChunkSource<R> {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_chunk(&mut self, position: u64, len: usize) -> io::Result<Vec<u8>> {
        self.inner.seek(SeekFrom::Start(position))?;
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}
