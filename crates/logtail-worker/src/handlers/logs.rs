//! Logs operation handler.
//!
//! Resolves the caller's path under the configured log root, runs one
//! backward scan and answers with the page plus the request for the next.

use logtail::{wire, LogRoot, ResolveError, ScanError, ScanRequest, TailScanner};
use logtail_protocol::{ops::LogsRequest, RpcError, RpcRequest};
use tracing::{debug, warn};

use crate::config::WorkerConfig;

/// Handle the logs operation.
pub fn handle(request: &RpcRequest, config: &WorkerConfig) -> Result<serde_json::Value, RpcError> {
    let logs_request: LogsRequest = serde_json::from_value(request.payload.clone())
        .map_err(|e| RpcError::validation_failed(format!("invalid logs request: {}", e)))?;

    let logpath = match logs_request.logpath.as_deref() {
        Some(path) if !path.trim().is_empty() => path,
        _ => return Err(RpcError::invalid_request("logpath parameter is required")),
    };

    let settings = &config.settings;
    let path = LogRoot::new(&settings.log_root)
        .resolve(logpath)
        .map_err(|e| resolve_error(logpath, e))?;

    let scan_request = ScanRequest::new(
        path,
        logs_request.num_lines.unwrap_or(settings.default_num_lines),
    )
    .map(|r| r.with_start_offset(logs_request.offset.unwrap_or(0)))
    .and_then(|r| r.with_page_size(logs_request.page_size.unwrap_or(settings.default_page_size)))
    .and_then(|r| r.with_pattern(logs_request.regex.as_deref()))
    .map_err(|e| scan_error(logpath, e))?;

    let result = TailScanner::new(settings.scan)
        .scan(&scan_request)
        .map_err(|e| scan_error(logpath, e))?;
    debug!(
        logpath,
        lines = result.lines_retrieved,
        next_offset = result.next_offset_from_end,
        "logs page served"
    );

    let response = wire::logs_response(logpath, &scan_request, result);
    serde_json::to_value(response).map_err(|e| {
        RpcError::invalid_request(format!("failed to serialize response: {}", e))
    })
}

fn resolve_error(logpath: &str, err: ResolveError) -> RpcError {
    match err {
        ResolveError::NotFound(_) => RpcError::log_not_found(logpath),
        ResolveError::Empty | ResolveError::Absolute(_) | ResolveError::Traversal(_) => {
            warn!(logpath, "rejected log path");
            RpcError::invalid_request(err.to_string())
        }
    }
}

/// Messages never carry the resolved path; callers only know the relative one.
fn scan_error(logpath: &str, err: ScanError) -> RpcError {
    match err {
        ScanError::NotFound { .. } => RpcError::log_not_found(logpath),
        ScanError::Io { source, .. } => {
            warn!(logpath, error = %source, "log read failed");
            RpcError::io_failure(logpath, format!("failed to read log file: {}", source))
        }
        ScanError::InvalidLineCount { .. } => RpcError::invalid_field("num_lines", err.to_string()),
        ScanError::InvalidPageSize { .. } => RpcError::invalid_field("page_size", err.to_string()),
        ScanError::BadRegex { .. } => RpcError::invalid_field("regex", err.to_string()),
    }
}
