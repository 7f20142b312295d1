//! Error types for the RPC protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes returned in RPC error responses.
///
/// These codes are stable and used for automation. Each maps onto the HTTP
/// status an HTTP front end would return for the same failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed envelope, missing log path, or a path outside the log root.
    InvalidRequest,
    /// Payload does not match the operation schema or carries invalid values.
    ValidationFailed,
    /// Protocol version is outside the supported range.
    UnsupportedProtocol,
    /// Unknown operation requested.
    UnknownOperation,
    /// The requested log file does not exist.
    LogNotFound,
    /// Reading the log file failed mid-scan.
    IoFailure,
}

impl ErrorCode {
    /// HTTP status equivalent of this code.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidRequest | Self::UnsupportedProtocol => 400,
            Self::LogNotFound | Self::UnknownOperation => 404,
            Self::ValidationFailed => 422,
            Self::IoFailure => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "INVALID_REQUEST"),
            Self::ValidationFailed => write!(f, "VALIDATION_FAILED"),
            Self::UnsupportedProtocol => write!(f, "UNSUPPORTED_PROTOCOL"),
            Self::UnknownOperation => write!(f, "UNKNOWN_OPERATION"),
            Self::LogNotFound => write!(f, "LOG_NOT_FOUND"),
            Self::IoFailure => write!(f, "IO_FAILURE"),
        }
    }
}

/// RPC error response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code from the registry.
    pub code: ErrorCode,
    /// Human-readable, single-line error message.
    /// Must not contain absolute filesystem paths outside the log root.
    pub message: String,
    /// Optional machine-readable details (failing field, offending value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    /// Create a new RPC error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create a new RPC error with additional data.
    pub fn with_data(code: ErrorCode, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create an INVALID_REQUEST error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Create a VALIDATION_FAILED error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Create a VALIDATION_FAILED error naming the offending field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::with_data(
            ErrorCode::ValidationFailed,
            message,
            serde_json::json!({ "field": field }),
        )
    }

    /// Create an UNSUPPORTED_PROTOCOL error.
    pub fn unsupported_protocol(version: i32, min: i32, max: i32) -> Self {
        Self::with_data(
            ErrorCode::UnsupportedProtocol,
            format!("protocol_version {} is outside supported range [{}, {}]", version, min, max),
            serde_json::json!({
                "requested": version,
                "min": min,
                "max": max
            }),
        )
    }

    /// Create an UNKNOWN_OPERATION error.
    pub fn unknown_operation(op: &str) -> Self {
        Self::with_data(
            ErrorCode::UnknownOperation,
            format!("unknown operation: {}", op),
            serde_json::json!({ "op": op }),
        )
    }

    /// Create a LOG_NOT_FOUND error for a caller-relative path.
    pub fn log_not_found(logpath: &str) -> Self {
        Self::with_data(
            ErrorCode::LogNotFound,
            "Log file not found.",
            serde_json::json!({ "logpath": logpath }),
        )
    }

    /// Create an IO_FAILURE error.
    pub fn io_failure(logpath: &str, message: impl Into<String>) -> Self {
        Self::with_data(
            ErrorCode::IoFailure,
            message,
            serde_json::json!({ "logpath": logpath }),
        )
    }

    /// HTTP status equivalent of this error.
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.http_status(), 400);
        assert_eq!(ErrorCode::LogNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ValidationFailed.http_status(), 422);
        assert_eq!(ErrorCode::IoFailure.http_status(), 500);
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let value = serde_json::to_value(ErrorCode::LogNotFound).unwrap();
        assert_eq!(value, "LOG_NOT_FOUND");
        assert_eq!(ErrorCode::LogNotFound.to_string(), "LOG_NOT_FOUND");
    }

    #[test]
    fn test_log_not_found_data() {
        let err = RpcError::log_not_found("missing.log");
        assert_eq!(err.message, "Log file not found.");
        assert_eq!(err.data.unwrap()["logpath"], "missing.log");
    }
}
