//! Reverse-chunked tail scanning
//!
//! Reads a log file backward in bounded chunks:
//! - [`ChunkSource`]: positioned reads from the file
//! - [`LineAssembler`]: complete lines from chunks fed back to front
//! - [`LineFilter`]: optional regex over each assembled batch
//! - [`TailScanner`]: the backward loop, stop conditions and resume offset

mod assembler;
mod chunk;
mod filter;
mod line;
mod request;
mod scanner;

use std::io;
use std::path::{Path, PathBuf};

pub use assembler::LineAssembler;
pub use chunk::{ChunkSource, FileChunkSource, SeekChunkSource};
pub use filter::LineFilter;
pub use line::{LogLine, RawLine};
pub use request::ScanRequest;
pub use scanner::TailScanner;

/// Why a scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The line target was reached.
    Satisfied,
    /// The read budget ran out; the result is partial.
    BudgetExhausted,
    /// The scan reached the start of the file.
    StartOfFile,
}

/// Outcome of one scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Returned lines, newest first.
    pub lines: Vec<LogLine>,
    /// Offset from the end at which the next page resumes.
    pub next_offset_from_end: u64,
    /// Number of lines returned.
    pub lines_retrieved: usize,
    /// File size observed when the scan opened the file.
    pub file_size: u64,
    /// Why the scan stopped.
    pub stop: StopReason,
}

impl ScanResult {
    /// True when the read budget cut the scan short.
    pub fn is_partial(&self) -> bool {
        self.stop == StopReason::BudgetExhausted
    }

    /// True when nothing older than the returned lines remains.
    pub fn is_exhausted(&self) -> bool {
        self.next_offset_from_end >= self.file_size
    }

    /// Line texts, newest first.
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }

    /// Consume the result, keeping the line texts.
    pub fn into_texts(self) -> Vec<String> {
        self.lines.into_iter().map(|line| line.text).collect()
    }
}

/// Scan errors
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("log file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line count must be greater than zero, got {value}")]
    InvalidLineCount { value: usize },

    #[error("page size must be greater than zero, got {value}")]
    InvalidPageSize { value: usize },

    #[error("invalid regex {pattern:?}: {source}")]
    BadRegex {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },
}

impl ScanError {
    /// Wrap an I/O error for `path`, separating out a missing file.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
