//! Canonical data structure for a single validated logon/logoff event.
//!
//! An [`EventRecord`] only comes out of [`crate::core::validator::validate`];
//! holding one means every field rule has passed and the partition date is
//! already known.

use crate::core::partition::PartitionDate;
use std::fmt;

/// Kind of session event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// A user signed on.
    Logon,
    /// A user signed off.
    Logoff,
}

impl EventType {
    /// Match the wire value exactly. Case variants such as `"Logon"` are not
    /// accepted.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "logon" => Some(Self::Logon),
            "logoff" => Some(Self::Logoff),
            _ => None,
        }
    }

    /// The lowercase wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logon => "logon",
            Self::Logoff => "logoff",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated logon/logoff event.
///
/// Serialises to the stored document shape `{userid, type, timestamp}`; the
/// derived partition date is not part of the document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EventRecord {
    userid: String,

    #[serde(rename = "type")]
    event_type: EventType,

    /// Original timestamp text, kept verbatim for the document and the key.
    timestamp: String,

    #[serde(skip)]
    partition_date: PartitionDate,
}

impl EventRecord {
    /// Only the validator builds records.
    pub(crate) fn new(
        event_type: EventType,
        userid: String,
        timestamp: String,
        partition_date: PartitionDate,
    ) -> Self {
        Self {
            userid,
            event_type,
            timestamp,
            partition_date,
        }
    }

    pub fn userid(&self) -> &str {
        &self.userid
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Business day this event is filed under.
    pub fn partition_date(&self) -> PartitionDate {
        self.partition_date
    }
}
