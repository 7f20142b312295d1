//! logtail - backward, paginated reads over large append-only logs
//!
//! Serves the tail of a log file without reading it in full. The file is
//! scanned back to front in bounded chunks, lines are reassembled across
//! chunk boundaries, optionally filtered by regex, and a resumable offset
//! lets callers page further back on later calls.

pub mod config;
pub mod pagination;
pub mod resolve;
pub mod scan;
pub mod timeout;
pub mod wire;

pub use config::{EffectiveConfig, Profile, ScanConfig, Settings};
pub use pagination::plan_continuation;
pub use resolve::{LogRoot, ResolveError};
pub use scan::{LineFilter, LogLine, ScanError, ScanRequest, ScanResult, StopReason, TailScanner};
pub use timeout::{BudgetStatus, ReadBudget};
