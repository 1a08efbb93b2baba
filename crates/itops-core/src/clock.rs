//! Evaluation date
//!
//! Derived statuses depend on "today". The clock is passed explicitly to
//! whoever evaluates, so tests and backfills can pin it.

use chrono::{NaiveDate, Utc};

/// Source of the evaluation date
pub trait Clock: Send + Sync {
    /// Current calendar day
    fn today(&self) -> NaiveDate;
}

/// Wall clock, UTC calendar day
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always returns the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
