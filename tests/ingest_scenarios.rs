//! End-to-end scenarios for the request handler.

use logonlogoff::store::{MemoryObjectStore, MemoryParameterStore};
use logonlogoff::util::encoding::decode_cp932;
use logonlogoff::{EventIngestor, Response};
use serde_json::{json, Value};

const BUCKET: &str = "logon-bucket";
const PREFIX: &str = "raw/logonlogoff";

fn params() -> MemoryParameterStore {
    MemoryParameterStore::new()
        .with("/logonlogoff/s3bucket", BUCKET)
        .with("/logonlogoff/prefixkey", PREFIX)
}

fn ingestor() -> EventIngestor<MemoryParameterStore, MemoryObjectStore> {
    EventIngestor::new(params(), MemoryObjectStore::new())
}

fn gateway_event(payload: Value) -> Value {
    json!({ "body": payload.to_string(), "httpMethod": "POST" })
}

fn body(response: &Response) -> Value {
    response
        .body_json()
        .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", response.body))
}

#[test]
fn logon_at_boundary_is_filed_under_same_day() {
    let ing = ingestor();
    let event = json!({"type": "logon", "userid": "user001", "timestamp": "2025-01-01 05:00:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 200);
    let body = body(&response);
    assert_eq!(body["bucket"], json!(BUCKET));
    assert_eq!(body["date"], json!("20250101"));
    let key = body["key"].as_str().unwrap();
    assert_eq!(
        key,
        "raw/logonlogoff/date=20250101/user001_logon_2025-01-01T05-00-00.json"
    );
    assert!(key.ends_with("user001_logon_2025-01-01T05-00-00.json"));

    let stored = ing.store().get(BUCKET, key).expect("object stored");
    assert_eq!(stored.content_type, "application/json; charset=cp932");
    let text = decode_cp932(&stored.body).unwrap();
    assert_eq!(
        text,
        r#"{"userid":"user001","type":"logon","timestamp":"2025-01-01 05:00:00"}"#
    );
}

#[test]
fn event_before_boundary_is_filed_under_previous_day() {
    let ing = ingestor();
    let event = json!({"type": "logon", "userid": "user001", "timestamp": "2025-01-01 04:59:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 200);
    assert_eq!(body(&response)["date"], json!("20241231"));
}

#[test]
fn gateway_body_is_unwrapped() {
    let ing = ingestor();
    let event = gateway_event(
        json!({"type": "logoff", "userid": "abc", "timestamp": "2025-06-30 18:00:00"}),
    );
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 200, "body: {}", response.body);
    assert_eq!(
        body(&response)["key"],
        json!("raw/logonlogoff/date=20250630/abc_logoff_2025-06-30T18-00-00.json")
    );
}

#[test]
fn missing_userid_is_rejected() {
    let ing = ingestor();
    let event = json!({"type": "logon", "timestamp": "2025-01-01 05:00:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body(&response),
        json!({"message": "missing required fields", "missing": ["userid"]})
    );
    assert!(ing.store().is_empty(), "Nothing may be written on rejection");
}

#[test]
fn absent_event_reports_every_field() {
    let response = ingestor().handle(None);
    assert_eq!(response.status_code, 400);
    assert_eq!(
        body(&response)["missing"],
        json!(["type", "userid", "timestamp"])
    );
}

#[test]
fn unknown_type_is_rejected() {
    let ing = ingestor();
    let event = json!({"type": "walk", "userid": "user001", "timestamp": "2025-01-01 05:00:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 400);
    let body = body(&response);
    assert_eq!(body["message"], json!("invalid type"));
    assert_eq!(body["value"], json!("walk"));
    assert!(ing.store().is_empty());
}

#[test]
fn symbols_in_userid_are_rejected() {
    let ing = ingestor();
    let event = json!({"type": "logon", "userid": "user!!", "timestamp": "2025-01-01 05:00:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response)["message"], json!("invalid userid"));
}

#[test]
fn month_thirteen_is_rejected_by_calendar_check() {
    let ing = ingestor();
    let event = json!({"type": "logon", "userid": "user001", "timestamp": "2025-13-01 05:00:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 400);
    let body = body(&response);
    assert_eq!(body["message"], json!("invalid timestamp value"));
    assert_eq!(body["value"], json!("2025-13-01 05:00:00"));
    assert!(ing.store().is_empty());
}

#[test]
fn malformed_timestamp_is_rejected_by_format_check() {
    let ing = ingestor();
    let event = json!({"type": "logon", "userid": "user001", "timestamp": "2025/01/01 05:00:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response)["message"], json!("invalid timestamp format"));
}

#[test]
fn storage_failure_is_reported_as_500() {
    let ing = EventIngestor::new(params(), MemoryObjectStore::failing("AccessDenied"));
    let event = json!({"type": "logon", "userid": "user001", "timestamp": "2025-01-01 05:00:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 500);
    let body = body(&response);
    assert_eq!(body["message"], json!("failed to put object to S3"));
    assert!(
        body["error"].as_str().unwrap().contains("AccessDenied"),
        "error text missing: {body}"
    );
}

#[test]
fn missing_parameter_is_reported_as_500() {
    let params = MemoryParameterStore::new().with("/logonlogoff/prefixkey", PREFIX);
    let ing = EventIngestor::new(params, MemoryObjectStore::new());
    let event = json!({"type": "logon", "userid": "user001", "timestamp": "2025-01-01 05:00:00"});
    let response = ing.handle(Some(&event));

    assert_eq!(response.status_code, 500);
    let body = body(&response);
    assert_eq!(body["message"], json!("failed to get parameter"));
    assert_eq!(body["name"], json!("/logonlogoff/s3bucket"));
    assert!(ing.store().is_empty());
}

#[test]
fn validation_runs_before_configuration_lookup() {
    // No parameters at all: a bad payload must still get its 400.
    let ing = EventIngestor::new(MemoryParameterStore::new(), MemoryObjectStore::new());
    let event = json!({"type": "logon", "userid": "user!!", "timestamp": "2025-01-01 05:00:00"});
    assert_eq!(ing.handle(Some(&event)).status_code, 400);
}

#[test]
fn keys_are_distinct_per_event_tuple() {
    let ing = ingestor();
    let events = [
        json!({"type": "logon", "userid": "a", "timestamp": "2025-01-01 05:00:00"}),
        json!({"type": "logoff", "userid": "a", "timestamp": "2025-01-01 05:00:00"}),
        json!({"type": "logon", "userid": "b", "timestamp": "2025-01-01 05:00:00"}),
        json!({"type": "logon", "userid": "a", "timestamp": "2025-01-01 05:00:01"}),
    ];
    let mut keys: Vec<String> = events
        .iter()
        .map(|e| body(&ing.handle(Some(e)))["key"].as_str().unwrap().to_string())
        .collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), events.len());
    assert_eq!(ing.store().len(), events.len());
}

#[test]
fn response_envelope_serialises_with_status_code() {
    let response = ingestor().handle(None);
    let rendered = serde_json::to_value(&response).unwrap();
    assert_eq!(rendered["statusCode"], json!(400));
    assert!(rendered["body"].is_string());
}
