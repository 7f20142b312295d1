//! Operation-specific types.

pub mod logs;
pub mod probe;

pub use logs::{LogsMetadata, LogsRequest, LogsResponse};
pub use probe::{ProbeLimits, ProbeResponse};

/// Known operation names.
pub mod names {
    pub const PROBE: &str = "probe";
    pub const LOGS: &str = "logs";
}
