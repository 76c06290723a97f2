//! Payload extraction from the transport event.
//!
//! Two envelope shapes are accepted:
//! - a gateway request whose `body` field is a JSON string holding the event,
//! - a flat object exposing `type`, `userid` and `timestamp` directly.
//!
//! Extraction never fails. A body that is not a JSON object degrades to the
//! flat-object reading, and anything unrecognisable yields an empty payload
//! that the presence check then rejects.

use serde_json::{Map, Value};

/// The three event fields as received, before any validation.
///
/// Each slot holds whatever JSON value the caller sent, so the validator can
/// report the original value in its rejection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPayload {
    pub event_type: Option<Value>,
    pub userid: Option<Value>,
    pub timestamp: Option<Value>,
}

impl RawPayload {
    /// Read the three known keys from a JSON object. Other keys are ignored.
    pub fn from_object(map: &Map<String, Value>) -> Self {
        Self {
            event_type: map.get("type").cloned(),
            userid: map.get("userid").cloned(),
            timestamp: map.get("timestamp").cloned(),
        }
    }

    /// Look a field up by its wire name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match name {
            "type" => self.event_type.as_ref(),
            "userid" => self.userid.as_ref(),
            "timestamp" => self.timestamp.as_ref(),
            _ => None,
        }
    }
}

/// Unwrap a transport event into a [`RawPayload`].
pub fn extract_payload(event: Option<&Value>) -> RawPayload {
    let Some(Value::Object(envelope)) = event else {
        if let Some(other) = event.filter(|v| !v.is_null()) {
            tracing::debug!("Ignoring non-object event of type {}", json_kind(other));
        }
        return RawPayload::default();
    };

    if let Some(Value::String(body)) = envelope.get("body") {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(inner)) => return RawPayload::from_object(&inner),
            Ok(other) => {
                tracing::debug!(
                    "Body is JSON {} rather than an object, reading top-level fields",
                    json_kind(&other)
                );
            }
            Err(e) => {
                tracing::debug!("Body is not JSON ({e}), reading top-level fields");
            }
        }
    }

    RawPayload::from_object(envelope)
}

/// Short name of a JSON value's kind for log lines.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
