//! Conversion between scan results and `logs` wire payloads.

use logtail_protocol::ops::{LogsMetadata, LogsRequest, LogsResponse};

use crate::pagination::plan_continuation;
use crate::scan::{ScanRequest, ScanResult};

/// Express `request` as a `logs` payload for the caller-relative `logpath`.
///
/// Every field is filled in, so a resubmitted request does not depend on
/// the worker's defaults staying the same between calls.
pub fn logs_request(logpath: &str, request: &ScanRequest) -> LogsRequest {
    LogsRequest {
        logpath: Some(logpath.to_string()),
        num_lines: Some(request.max_lines()),
        offset: Some(request.start_offset_from_end()),
        page_size: Some(request.page_size_cap()),
        regex: request.filter().as_str().map(str::to_string),
    }
}

/// Build the `logs` response for one completed scan.
pub fn logs_response(logpath: &str, original: &ScanRequest, result: ScanResult) -> LogsResponse {
    let next_request = plan_continuation(original, &result).map(|next| logs_request(logpath, &next));
    let metadata = LogsMetadata {
        lines_retrieved: result.lines_retrieved,
        next_request,
        partial: result.is_partial(),
    };
    LogsResponse {
        data: result.into_texts(),
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{LogLine, StopReason};

    fn result(texts: &[&str], next_offset_from_end: u64, file_size: u64, stop: StopReason) -> ScanResult {
        ScanResult {
            lines: texts
                .iter()
                .map(|t| LogLine {
                    offset: 0,
                    text: t.to_string(),
                })
                .collect(),
            next_offset_from_end,
            lines_retrieved: texts.len(),
            file_size,
            stop,
        }
    }

    #[test]
    fn test_logs_request_fills_every_field() {
        let request = ScanRequest::new("/var/log/app.log", 150)
            .unwrap()
            .with_start_offset(640)
            .with_page_size(50)
            .unwrap()
            .with_pattern(Some("ERROR"))
            .unwrap();
        let wire = logs_request("app.log", &request);

        assert_eq!(wire.logpath.as_deref(), Some("app.log"));
        assert_eq!(wire.num_lines, Some(150));
        assert_eq!(wire.offset, Some(640));
        assert_eq!(wire.page_size, Some(50));
        assert_eq!(wire.regex.as_deref(), Some("ERROR"));
    }

    #[test]
    fn test_response_without_continuation() {
        let request = ScanRequest::new("/logs/test.log", 2).unwrap();
        let response = logs_response("test.log", &request, result(&["b", "a"], 4, 100, StopReason::Satisfied));

        assert_eq!(response.data, vec!["b", "a"]);
        assert_eq!(response.metadata.lines_retrieved, 2);
        assert!(response.metadata.next_request.is_none());
        assert!(!response.metadata.partial);
    }

    #[test]
    fn test_response_with_continuation() {
        let request = ScanRequest::new("/logs/test.log", 5).unwrap().with_page_size(2).unwrap();
        let response = logs_response("test.log", &request, result(&["d", "c"], 4, 100, StopReason::Satisfied));

        let next = response.metadata.next_request.unwrap();
        assert_eq!(next.logpath.as_deref(), Some("test.log"));
        assert_eq!(next.num_lines, Some(3));
        assert_eq!(next.offset, Some(4));
        assert_eq!(next.page_size, Some(2));
        assert_eq!(next.regex, None);
    }

    #[test]
    fn test_partial_flag() {
        let request = ScanRequest::new("/logs/test.log", 5).unwrap();
        let response = logs_response("test.log", &request, result(&[], 0, 100, StopReason::BudgetExhausted));

        assert!(response.metadata.partial);
        assert!(response.metadata.next_request.is_some());
    }
}
