//! logtail Worker Entrypoint
//!
//! Usage: logtail-worker rpc
//!
//! Reads a single JSON RPC request from stdin, dispatches to the
//! appropriate handler, and writes the response to stdout. Logs go to
//! stderr so they never corrupt the response stream.

use std::process::ExitCode;

use logtail_worker::{RpcHandler, WorkerConfig};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] != "rpc" {
        eprintln!("Usage: logtail-worker rpc");
        eprintln!();
        eprintln!("Runs the RPC handler, reading JSON from stdin and writing to stdout.");
        return ExitCode::FAILURE;
    }

    let (config, profile) = match WorkerConfig::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(profile.default_log_filter()));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let handler = RpcHandler::new(config);
    if let Err(e) = handler.run() {
        error!(error = %e, "RPC handler failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
