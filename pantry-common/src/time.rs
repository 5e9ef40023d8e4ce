//! Timestamp utilities
//!
//! Rows store `created_at` as RFC 3339 text with millisecond precision so that
//! lexical ordering in SQLite matches chronological ordering.

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC time formatted for storage
pub fn now_rfc3339() -> String {
    to_rfc3339(now())
}

/// Format a timestamp the way rows store it
pub fn to_rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Milliseconds since the Unix epoch (used for upload file names)
pub fn unix_millis() -> i64 {
    now().timestamp_millis()
}
