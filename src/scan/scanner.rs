//! The backward scan loop.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::assembler::LineAssembler;
use super::chunk::{ChunkSource, FileChunkSource};
use super::line::LogLine;
use super::request::ScanRequest;
use super::{ScanError, ScanResult, StopReason};
use crate::config::ScanConfig;
use crate::timeout::ReadBudget;

/// Where the next backward read begins.
#[derive(Debug, Clone, Copy)]
struct ReadCursor {
    /// Start of the region read so far; the next chunk ends here.
    position: u64,
    /// Bytes between `position` and the end of the file.
    bytes_consumed_from_end: u64,
}

/// Reads the tail of a log file back to front.
///
/// Holds only immutable configuration; every call opens its own file and
/// keeps its own cursor, so one scanner can serve any number of requests.
#[derive(Debug, Clone)]
pub struct TailScanner {
    config: ScanConfig,
}

impl TailScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Lines a single call returns at most for `request`.
    pub fn target_lines(&self, request: &ScanRequest) -> usize {
        request
            .max_lines()
            .min(self.config.max_lines)
            .min(request.page_size_cap())
    }

    /// Open the request's file and scan it.
    ///
    /// The file handle is dropped before returning, on success and on error.
    pub fn scan(&self, request: &ScanRequest) -> Result<ScanResult, ScanError> {
        let path = request.log_path();
        let mut source = FileChunkSource::open(path).map_err(|e| ScanError::io(path, e))?;
        self.scan_source(&mut source, request)
    }

    /// Scan an already opened source.
    pub fn scan_source<S: ChunkSource>(
        &self,
        source: &mut S,
        request: &ScanRequest,
    ) -> Result<ScanResult, ScanError> {
        let budget = ReadBudget::start(self.config.read_timeout());
        let file_size = source.size();
        let start_offset = request.start_offset_from_end().min(file_size);
        let effective_eof = file_size - start_offset;
        let target = self.target_lines(request);
        let chunk_size = self.config.chunk_size.max(1) as u64;

        let mut cursor = ReadCursor {
            position: effective_eof,
            bytes_consumed_from_end: start_offset,
        };
        let mut assembler = LineAssembler::new(effective_eof);
        let mut buffer: VecDeque<LogLine> = VecDeque::new();
        let mut stop = StopReason::StartOfFile;

        while cursor.position > 0 {
            let start = cursor.position.saturating_sub(chunk_size);
            let len = (cursor.position - start) as usize;
            let chunk = source
                .read_chunk(start, len)
                .map_err(|e| ScanError::io(request.log_path(), e))?;
            cursor.position = start;
            cursor.bytes_consumed_from_end = file_size - start;

            let mut raw = assembler.push_chunk(start, chunk);
            if start == 0 {
                if let Some(first) = assembler.finish() {
                    raw.insert(0, first);
                }
            }
            let batch = request.filter().retain(raw.into_iter().map(LogLine::decode));
            let matched = batch.len();
            for line in batch.into_iter().rev() {
                buffer.push_front(line);
            }

            debug!(
                position = cursor.position,
                consumed = cursor.bytes_consumed_from_end,
                matched,
                buffered = buffer.len(),
                carried = assembler.carried(),
                "read chunk"
            );

            if buffer.len() >= target {
                stop = StopReason::Satisfied;
                break;
            }
            if cursor.position == 0 {
                break;
            }
            // Stopping before any line completes would hand back the same
            // offset, so the budget only applies once the frontier has moved.
            if budget.check().is_exhausted() && assembler.frontier() < effective_eof {
                warn!(
                    path = %request.log_path().display(),
                    elapsed_ms = budget.elapsed().as_millis() as u64,
                    consumed = cursor.bytes_consumed_from_end,
                    collected = buffer.len(),
                    target,
                    "read budget exhausted, returning partial result"
                );
                stop = StopReason::BudgetExhausted;
                break;
            }
        }

        let excess = buffer.len().saturating_sub(target);
        buffer.drain(..excess);

        let resume_at = match stop {
            StopReason::Satisfied => buffer
                .front()
                .map_or(assembler.frontier(), |oldest| oldest.offset),
            StopReason::BudgetExhausted => assembler.frontier(),
            StopReason::StartOfFile => 0,
        };
        let next_offset_from_end = file_size - resume_at;

        let lines: Vec<LogLine> = buffer.into_iter().rev().collect();
        info!(
            path = %request.log_path().display(),
            file_size,
            start_offset,
            next_offset_from_end,
            lines = lines.len(),
            stop = ?stop,
            "scan complete"
        );

        Ok(ScanResult {
            lines_retrieved: lines.len(),
            lines,
            next_offset_from_end,
            file_size,
            stop,
        })
    }
}
