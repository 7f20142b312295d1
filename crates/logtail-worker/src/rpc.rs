//! Worker RPC Handler
//!
//! Implements the stdin/stdout JSON RPC handler for the worker entrypoint:
//!
//!   logtail-worker rpc
//!
//! The handler reads a single JSON request from stdin, dispatches to the
//! appropriate operation handler, and writes a single response to stdout.
//! Successful responses to callers that accept gzip are binary-framed: a
//! JSON header line followed by exactly `content_length` compressed bytes.

use std::io::{self, BufRead, Write};

use logtail_protocol::{
    ops::names, FramedResponseHeader, RpcError, RpcRequest, RpcResponse, StreamInfo,
    PROTOCOL_VERSION_PROBE,
};
use tracing::{debug, info_span, warn};

use crate::config::WorkerConfig;
use crate::encoding;
use crate::handlers;

/// Main RPC handler for the worker.
pub struct RpcHandler {
    config: WorkerConfig,
}

impl RpcHandler {
    /// Create a new RPC handler with the given configuration.
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    /// Run the RPC handler, reading from stdin and writing to stdout.
    pub fn run(&self) -> io::Result<()> {
        self.run_with_io(&mut io::stdin().lock(), &mut io::stdout().lock())
    }

    /// Run the RPC handler with custom I/O (for testing).
    pub fn run_with_io<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
    ) -> io::Result<()> {
        let request = match self.read_request(reader) {
            Ok(req) => req,
            Err(e) => {
                // Unparsable requests are answered with protocol_version: 0
                warn!(error = %e, "rejected request");
                let response = RpcResponse::error(PROTOCOL_VERSION_PROBE, String::new(), e);
                return self.write_response(writer, &response);
            }
        };

        let _span = info_span!("rpc", op = %request.op, request_id = %request.request_id).entered();

        if let Err(e) = self.validate_protocol_version(&request) {
            let response =
                RpcResponse::error(request.protocol_version, request.request_id.clone(), e);
            return self.write_response(writer, &response);
        }

        let response = self.dispatch(&request);
        if let Some(ref e) = response.error {
            debug!(code = %e.code, status = e.http_status(), "request failed");
        }

        if response.ok && request.accepts_gzip() {
            self.write_framed(writer, &response)
        } else {
            self.write_response(writer, &response)
        }
    }

    /// Read and parse the RPC request from the reader.
    fn read_request<R: BufRead>(&self, reader: &mut R) -> Result<RpcRequest, RpcError> {
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| RpcError::invalid_request(format!("failed to read request: {}", e)))?;

        serde_json::from_str(&line)
            .map_err(|e| RpcError::invalid_request(format!("invalid JSON: {}", e)))
    }

    /// Validate the protocol version in the request.
    fn validate_protocol_version(&self, request: &RpcRequest) -> Result<(), RpcError> {
        // probe requests MUST use protocol_version: 0
        if request.op == names::PROBE {
            if request.protocol_version != PROTOCOL_VERSION_PROBE {
                return Err(RpcError::unsupported_protocol(
                    request.protocol_version,
                    PROTOCOL_VERSION_PROBE,
                    PROTOCOL_VERSION_PROBE,
                ));
            }
            return Ok(());
        }

        if request.protocol_version < self.config.protocol_min
            || request.protocol_version > self.config.protocol_max
        {
            return Err(RpcError::unsupported_protocol(
                request.protocol_version,
                self.config.protocol_min,
                self.config.protocol_max,
            ));
        }

        Ok(())
    }

    /// Dispatch the request to the appropriate operation handler.
    fn dispatch(&self, request: &RpcRequest) -> RpcResponse {
        let result = match request.op.as_str() {
            names::PROBE => handlers::probe::handle(&self.config),
            names::LOGS => handlers::logs::handle(request, &self.config),
            _ => Err(RpcError::unknown_operation(&request.op)),
        };

        match result {
            Ok(payload) => {
                RpcResponse::success(request.protocol_version, request.request_id.clone(), payload)
            }
            Err(e) => RpcResponse::error(request.protocol_version, request.request_id.clone(), e),
        }
    }

    /// Write the response as a single JSON line.
    fn write_response<W: Write>(&self, writer: &mut W, response: &RpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(writer, "{}", json)?;
        writer.flush()
    }

    /// Write a framed header line followed by the gzip of the response JSON.
    fn write_framed<W: Write>(&self, writer: &mut W, response: &RpcResponse) -> io::Result<()> {
        let json = serde_json::to_string(response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let body = encoding::gzip(json.as_bytes())?;

        let header = FramedResponseHeader {
            protocol_version: response.protocol_version,
            request_id: response.request_id.clone(),
            ok: true,
            stream: StreamInfo {
                content_length: body.len() as u64,
                compression: encoding::GZIP.to_string(),
                format: encoding::JSON.to_string(),
            },
        };
        let header = serde_json::to_string(&header)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        debug!(plain = json.len(), compressed = body.len(), "framed response");

        writeln!(writer, "{}", header)?;
        writer.write_all(&body)?;
        writer.flush()
    }
}
