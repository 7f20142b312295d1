//! Probe operation handler.
//!
//! Reports protocol range, supported operations and read limits.

use logtail_protocol::{
    ops::{ProbeLimits, ProbeResponse},
    RpcError, LANE_VERSION,
};

use crate::config::WorkerConfig;

/// Handle the probe operation.
pub fn handle(config: &WorkerConfig) -> Result<serde_json::Value, RpcError> {
    let settings = &config.settings;
    let response = ProbeResponse {
        lane_version: LANE_VERSION.to_string(),
        protocol_min: config.protocol_min,
        protocol_max: config.protocol_max,
        features: config.features.clone(),
        limits: ProbeLimits {
            max_lines: settings.scan.max_lines,
            chunk_size: settings.scan.chunk_size,
            read_timeout_ms: settings.scan.read_timeout_ms,
            default_page_size: settings.default_page_size,
        },
    };

    serde_json::to_value(response).map_err(|e| {
        RpcError::invalid_request(format!("failed to serialize response: {}", e))
    })
}
