//! Trailing analysis window

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::core::constants::ANALYSIS_WINDOW_DAYS;

/// Date range covered by one analysis run.
///
/// `end` is the invocation date and `start` lies exactly
/// [`ANALYSIS_WINDOW_DAYS`] before it. The billing provider treats `end` as
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisPeriod {
    /// Window of [`ANALYSIS_WINDOW_DAYS`] days ending on `end`
    pub fn ending(end: NaiveDate) -> Self {
        Self {
            start: end - Duration::days(ANALYSIS_WINDOW_DAYS),
            end,
        }
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
