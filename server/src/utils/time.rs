//! Time utility functions

use chrono::{DateTime, Utc};

use crate::core::constants::REPORT_KEY_TIME_FORMAT;

/// Format a timestamp as ISO 8601 / RFC 3339 (microsecond precision, `Z` suffix)
pub fn to_iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Format a timestamp for use inside an object key (`YYYY-MM-DD_HH-MM-SS`)
pub fn key_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(REPORT_KEY_TIME_FORMAT).to_string()
}
