//! Timestamp utilities
//!
//! The backend sends event times as ISO-8601 strings, sometimes with an
//! offset (RFC 3339) and sometimes as a naive local date-time. Both are
//! normalized to `NaiveDateTime`: offset values are converted to UTC, naive
//! values are kept as given.

use chrono::{DateTime, NaiveDateTime};

/// Parse a backend timestamp, returning `None` when it is not ISO-8601
pub fn parse_event_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    raw.parse::<NaiveDateTime>().ok()
}

/// Format a backend timestamp for display, e.g. `May 1, 2024, 06:30 PM`
///
/// Unparseable input is returned unchanged.
pub fn format_event_time(raw: &str) -> String {
    match parse_event_time(raw) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => raw.to_string(),
    }
}
