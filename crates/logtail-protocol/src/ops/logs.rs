//! Logs operation types.
//!
//! Backward, paginated reads from the end of a log file.

use serde::{Deserialize, Serialize};

/// Logs request payload.
///
/// Omitted numeric fields are filled from the worker's configured defaults,
/// so the same shape is used for a caller's first request and for the
/// `next_request` echoed back in [`LogsMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsRequest {
    /// Path of the log file, relative to the worker's log root.
    #[serde(default)]
    pub logpath: Option<String>,
    /// Total number of lines wanted across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_lines: Option<usize>,
    /// Bytes from the end of the file already consumed by earlier pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Maximum lines returned by this call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Optional filter; only lines matching this regex are returned.
    #[serde(default)]
    pub regex: Option<String>,
}

/// Logs response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    /// Matching lines, newest first.
    pub data: Vec<String>,
    /// Pagination metadata.
    pub metadata: LogsMetadata,
}

/// Pagination metadata attached to every logs response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsMetadata {
    /// Number of lines in `data`.
    pub lines_retrieved: usize,
    /// Request to submit for the next page (null when nothing remains).
    pub next_request: Option<LogsRequest>,
    /// Set when the read budget ran out before the page was filled.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
}
