//! Operation handlers for the worker RPC.
//!
//! Each operation has its own handler module that processes requests
//! and returns responses.

pub mod logs;
pub mod probe;
