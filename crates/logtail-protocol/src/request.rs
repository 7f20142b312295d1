//! RPC request types.

use serde::{Deserialize, Serialize};

/// RPC request envelope.
///
/// The worker accepts a single JSON request line on stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version. For probe requests, this MUST be 0.
    pub protocol_version: i32,
    /// Operation name.
    pub op: String,
    /// Caller-chosen request ID for correlation.
    pub request_id: String,
    /// Operation-specific payload.
    #[serde(default)]
    pub payload: serde_json::Value,
    /// Encodings the caller accepts for the response body, in the same
    /// comma-separated form as an HTTP `Accept-Encoding` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_encoding: Option<String>,
}

impl RpcRequest {
    /// Check whether the caller accepts a gzip-framed response.
    pub fn accepts_gzip(&self) -> bool {
        self.accept_encoding.as_deref().is_some_and(|header| {
            header
                .split(',')
                .map(|token| token.split(';').next().unwrap_or("").trim())
                .any(|coding| coding.eq_ignore_ascii_case("gzip"))
        })
    }
}
