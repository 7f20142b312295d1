//! Probe operation types.
//!
//! The probe operation reports what the worker supports and the limits it
//! enforces on reads.

use serde::{Deserialize, Serialize};

/// Probe response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResponse {
    /// Lane version running on the worker.
    pub lane_version: String,
    /// Minimum protocol version supported.
    pub protocol_min: i32,
    /// Maximum protocol version supported.
    pub protocol_max: i32,
    /// Operations supported by this worker.
    pub features: Vec<String>,
    /// Read limits in effect.
    pub limits: ProbeLimits,
}

/// Read limits advertised by the worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeLimits {
    /// Hard cap on lines returned by a single call.
    pub max_lines: usize,
    /// Bytes read per backward chunk.
    pub chunk_size: usize,
    /// Wall-clock read budget per call.
    pub read_timeout_ms: u64,
    /// Page size applied when the caller omits one.
    pub default_page_size: usize,
}
