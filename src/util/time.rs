//! Timestamp helpers for the ingestor.
//!
//! Event timestamps are wall-clock values without a zone. They are parsed as
//! naive date-times and never converted.

use crate::util::constants::TIMESTAMP_FORMAT;
use crate::util::error::TimestampError;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Parse an event timestamp in `YYYY-MM-DD HH:MM:SS` form.
///
/// Rejects anything that is not a real calendar date-time: impossible months,
/// days or hours, the `:60` leap second `chrono` would otherwise accept, and
/// year 0.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TimestampError> {
    let dt = NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)?;
    if dt.nanosecond() >= 1_000_000_000 {
        return Err(TimestampError::LeapSecond);
    }
    if dt.year() < 1 {
        return Err(TimestampError::OutOfRange);
    }
    Ok(dt)
}

/// Make a timestamp safe for use in an object key: the date/time separator
/// becomes `T` and colons become hyphens.
///
/// `2025-01-01 05:00:00` → `2025-01-01T05-00-00`
pub fn safe_timestamp(timestamp: &str) -> String {
    timestamp.replace(' ', "T").replace(':', "-")
}

/// Format a `std::time::Duration` into a human-readable string.
///
/// Used when logging how long an invocation took.
/// Examples: `0.3ms`, `1.2s`, `1.5m`.
pub fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.01 {
        format!("{:.1}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}m")
    }
}
