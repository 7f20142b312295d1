//! Continuation planning
//!
//! All pagination state travels in the request handed back to the caller.
//! Nothing is remembered between calls.

use crate::scan::{ScanRequest, ScanResult};

/// Build the request that continues `original` after `result`.
///
/// Returns `None` when the caller's line count has been met or when nothing
/// older remains in the file. Otherwise the continuation keeps the path,
/// page size and compiled filter, resumes at `result.next_offset_from_end`,
/// and asks only for the lines still owed.
pub fn plan_continuation(original: &ScanRequest, result: &ScanResult) -> Option<ScanRequest> {
    if result.lines_retrieved >= original.max_lines || result.is_exhausted() {
        return None;
    }

    Some(ScanRequest {
        max_lines: original.max_lines - result.lines_retrieved,
        start_offset_from_end: result.next_offset_from_end,
        ..original.clone()
    })
}
