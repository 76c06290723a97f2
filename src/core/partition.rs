//! Partition date and object key derivation.
//!
//! A business day runs from 05:00:00 to 04:59:59 of the following calendar
//! day, so anything logged before 05:00 is filed under the previous date.
//! Objects are laid out as
//! `{prefix}/date={yyyyMMdd}/{userid}_{type}_{safeTimestamp}.json`.

use crate::core::event_record::EventRecord;
use crate::util::constants::{DAY_BOUNDARY_HOUR, OBJECT_EXTENSION, PARTITION_DATE_FORMAT};
use crate::util::error::TimestampError;
use crate::util::time::{parse_timestamp, safe_timestamp};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// The business day an event belongs to. Displays as `yyyyMMdd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionDate(NaiveDate);

impl PartitionDate {
    /// Apply the 05:00 boundary rule to an already-parsed date-time.
    ///
    /// # Errors
    /// [`TimestampError::OutOfRange`] when the previous day would fall before
    /// year 1 (only `0001-01-01` before 05:00).
    pub fn from_datetime(dt: NaiveDateTime) -> Result<Self, TimestampError> {
        let boundary = NaiveTime::from_hms_opt(DAY_BOUNDARY_HOUR, 0, 0)
            .ok_or(TimestampError::OutOfRange)?;
        let date = if dt.time() < boundary {
            dt.date().pred_opt().ok_or(TimestampError::OutOfRange)?
        } else {
            dt.date()
        };
        if date < NaiveDate::from_ymd_opt(1, 1, 1).ok_or(TimestampError::OutOfRange)? {
            return Err(TimestampError::OutOfRange);
        }
        Ok(Self(date))
    }

    /// The calendar date of this business day.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for PartitionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(PARTITION_DATE_FORMAT))
    }
}

impl serde::Serialize for PartitionDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Compute the `yyyyMMdd` business day for a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// ```
/// use logonlogoff::core::partition::compute_base_date;
///
/// assert_eq!(compute_base_date("2025-01-01 05:00:00").unwrap().to_string(), "20250101");
/// assert_eq!(compute_base_date("2025-01-02 04:59:00").unwrap().to_string(), "20250101");
/// assert_eq!(compute_base_date("2025-01-01 04:59:00").unwrap().to_string(), "20241231");
/// ```
pub fn compute_base_date(timestamp: &str) -> Result<PartitionDate, TimestampError> {
    PartitionDate::from_datetime(parse_timestamp(timestamp)?)
}

/// Object key under which one event is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Assemble the key for `record`. The prefix is used verbatim.
    pub fn build(prefix: &str, record: &EventRecord) -> Self {
        Self(format!(
            "{prefix}/date={date}/{userid}_{kind}_{ts}.{OBJECT_EXTENSION}",
            date = record.partition_date(),
            userid = record.userid(),
            kind = record.event_type(),
            ts = safe_timestamp(record.timestamp()),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
