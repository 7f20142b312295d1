//! Read budget enforcement
//!
//! A scan runs against a wall-clock budget:
//! - `read_timeout_ms`: maximum time a single scan may spend reading
//!
//! The budget is checked between chunks only. A chunk that has started is
//! always fully processed, so the offsets a scan reports stay reproducible.
//! Running out of budget is not an error; the scanner returns what it has.

use std::time::{Duration, Instant};

/// Budget check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Time remains
    Ok,
    /// The read budget has been used up
    Exhausted,
}

impl BudgetStatus {
    /// Returns true if the budget ran out
    pub fn is_exhausted(&self) -> bool {
        matches!(self, BudgetStatus::Exhausted)
    }
}

/// Wall-clock budget for one scan
///
/// Created when the scan starts. The budget does NOT interrupt reads by
/// itself; the scanner polls [`ReadBudget::check`] after each chunk.
#[derive(Debug, Clone, Copy)]
pub struct ReadBudget {
    /// Total time allowed
    limit: Duration,

    /// When the scan started
    start_time: Instant,
}

impl ReadBudget {
    /// Start a new budget of `limit`
    pub fn start(limit: Duration) -> Self {
        Self {
            limit,
            start_time: Instant::now(),
        }
    }

    /// Check whether the budget is used up
    pub fn check(&self) -> BudgetStatus {
        if self.elapsed() >= self.limit {
            BudgetStatus::Exhausted
        } else {
            BudgetStatus::Ok
        }
    }

    /// Get elapsed time since the scan started
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}
