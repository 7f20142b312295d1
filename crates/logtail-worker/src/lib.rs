//! logtail Worker
//!
//! Serves backward log reads over the stdin/stdout JSON RPC protocol.
//!
//! This crate can be used in two modes:
//! - **Standalone binary**: one request per process, e.g. behind an SSH
//!   forced-command or a socket activator
//! - **In-process library**: for unit and integration testing

pub mod config;
pub mod encoding;
pub mod handlers;
pub mod rpc;

pub use config::WorkerConfig;
pub use rpc::RpcHandler;
