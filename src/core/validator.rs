//! Validation pipeline for extracted payloads.
//!
//! Rules run in a fixed order and stop at the first failure; the failing rule
//! alone decides the rejection. Only the presence check reports several
//! problems at once (every missing key).
//!
//! 1. presence of `type`, `userid`, `timestamp`
//! 2. `type` is `"logon"` or `"logoff"`
//! 3. `userid` is a string
//! 4. `userid` is 1–15 ASCII letters or digits
//! 5. `userid` is at most 15 bytes encoded
//! 6. `timestamp` is a string
//! 7. `timestamp` looks like `YYYY-MM-DD HH:MM:SS`
//! 8. `timestamp` is a real calendar date-time

use crate::core::event_record::{EventRecord, EventType};
use crate::core::partition::compute_base_date;
use crate::core::payload::RawPayload;
use crate::util::constants::{
    ALLOWED_TYPES, REQUIRED_FIELDS, TIMESTAMP_FORMAT_HINT, USERID_MAX_BYTES, USERID_MAX_CHARS,
};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;

static USERID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[A-Za-z0-9]{{1,{USERID_MAX_CHARS}}}$")).expect("valid userid pattern")
});

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").expect("valid timestamp pattern")
});

/// A client-caused validation failure (HTTP 400).
///
/// `Display` gives the rejection message; [`Rejection::to_body`] gives the
/// full JSON body with the rule's context fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("missing required fields")]
    MissingFields { missing: Vec<&'static str> },

    #[error("invalid type")]
    InvalidType { value: Value },

    #[error("invalid userid type")]
    InvalidUseridType { value: Value },

    #[error("invalid userid")]
    InvalidUserid { value: String },

    #[error("invalid userid length")]
    InvalidUseridLength { value: String },

    #[error("invalid timestamp type")]
    InvalidTimestampType { value: Value },

    #[error("invalid timestamp format")]
    InvalidTimestampFormat { value: String },

    #[error("invalid timestamp value")]
    InvalidTimestampValue { value: String, error: String },
}

impl Rejection {
    /// JSON body returned to the caller.
    pub fn to_body(&self) -> Value {
        let message = self.to_string();
        match self {
            Self::MissingFields { missing } => json!({
                "message": message,
                "missing": missing,
            }),
            Self::InvalidType { value } => json!({
                "message": message,
                "allowed": ALLOWED_TYPES,
                "value": value,
            }),
            Self::InvalidUseridType { value } | Self::InvalidTimestampType { value } => json!({
                "message": message,
                "expected": "string",
                "value": value,
            }),
            Self::InvalidUserid { value } => json!({
                "message": message,
                "rule": format!("alphanumeric only, length <= {USERID_MAX_CHARS}"),
                "value": value,
            }),
            Self::InvalidUseridLength { value } => json!({
                "message": message,
                "rule": format!("<= {USERID_MAX_BYTES} bytes"),
                "value": value,
            }),
            Self::InvalidTimestampFormat { value } => json!({
                "message": message,
                "expected": TIMESTAMP_FORMAT_HINT,
                "value": value,
            }),
            Self::InvalidTimestampValue { value, error } => json!({
                "message": message,
                "expected": TIMESTAMP_FORMAT_HINT,
                "error": error,
                "value": value,
            }),
        }
    }
}

/// Run every rule against `payload` and build the validated record.
pub fn validate(payload: &RawPayload) -> Result<EventRecord, Rejection> {
    // 1. Presence: null and "" count as missing.
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| is_missing(payload.field(name)))
        .collect();
    if !missing.is_empty() {
        return Err(Rejection::MissingFields { missing });
    }

    let raw_type = payload.event_type.clone().unwrap_or(Value::Null);
    let raw_userid = payload.userid.clone().unwrap_or(Value::Null);
    let raw_timestamp = payload.timestamp.clone().unwrap_or(Value::Null);

    // 2. Type enum, exact match on the string value.
    let event_type = raw_type
        .as_str()
        .and_then(EventType::from_wire)
        .ok_or_else(|| Rejection::InvalidType {
            value: raw_type.clone(),
        })?;

    // 3. Userid type.
    let userid = match raw_userid {
        Value::String(s) => s,
        other => return Err(Rejection::InvalidUseridType { value: other }),
    };

    // 4. Userid charset and character length.
    if !USERID_RE.is_match(&userid) {
        return Err(Rejection::InvalidUserid { value: userid });
    }

    // 5. Userid byte length, checked independently of rule 4.
    if userid.len() > USERID_MAX_BYTES {
        return Err(Rejection::InvalidUseridLength { value: userid });
    }

    // 6. Timestamp type.
    let timestamp = match raw_timestamp {
        Value::String(s) => s,
        other => return Err(Rejection::InvalidTimestampType { value: other }),
    };

    // 7. Timestamp shape.
    if !TIMESTAMP_RE.is_match(&timestamp) {
        return Err(Rejection::InvalidTimestampFormat { value: timestamp });
    }

    // 8. Calendar validity, which also yields the business day.
    let partition_date = match compute_base_date(&timestamp) {
        Ok(date) => date,
        Err(e) => {
            return Err(Rejection::InvalidTimestampValue {
                value: timestamp,
                error: e.to_string(),
            })
        }
    };

    Ok(EventRecord::new(event_type, userid, timestamp, partition_date))
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
