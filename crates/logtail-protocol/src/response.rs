//! RPC response types.

use serde::{Deserialize, Serialize};
use crate::error::RpcError;

/// RPC response envelope.
///
/// The worker emits a single JSON response line on stdout, unless the
/// response is binary-framed (see [`FramedResponseHeader`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Protocol version (echoed from request, or 0 for probe).
    pub protocol_version: i32,
    /// Request ID echoed from the request.
    pub request_id: String,
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Success payload (present when ok=true).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    /// Error details (present when ok=false).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    /// Create a success response.
    pub fn success(protocol_version: i32, request_id: String, payload: serde_json::Value) -> Self {
        Self {
            protocol_version,
            request_id,
            ok: true,
            payload: Some(payload),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(protocol_version: i32, request_id: String, error: RpcError) -> Self {
        Self {
            protocol_version,
            request_id,
            ok: false,
            payload: None,
            error: Some(error),
        }
    }
}

/// Header line of a binary-framed response.
///
/// Exactly `stream.content_length` bytes follow the header's newline. Once
/// decompressed they are the JSON text of the [`RpcResponse`] that would
/// have been written unframed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramedResponseHeader {
    /// Protocol version (echoed).
    pub protocol_version: i32,
    /// Request ID (echoed).
    pub request_id: String,
    /// Always true; errors are never framed.
    pub ok: bool,
    /// Stream metadata for the binary body.
    pub stream: StreamInfo,
}

/// Binary stream metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Length of the binary body in bytes.
    pub content_length: u64,
    /// Compression applied to the body (gzip).
    pub compression: String,
    /// Format of the decompressed body (json).
    pub format: String,
}
