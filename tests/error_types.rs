//! Integration tests for error type construction and display.

use logonlogoff::core::validator::Rejection;
use logonlogoff::util::error::{parameter_err, IngestError, TimestampError};
use logonlogoff::HandlerError;
use serde_json::json;

#[test]
fn parameter_error_names_the_parameter() {
    let err = parameter_err("/logonlogoff/s3bucket", "parameter not found");
    let msg = err.to_string();
    assert!(
        msg.contains("/logonlogoff/s3bucket"),
        "Error message should contain the name: {msg}"
    );
    assert!(msg.contains("not found"), "Should contain reason: {msg}");
}

#[test]
fn storage_error_preserves_message() {
    let err = IngestError::Storage("bucket does not exist".into());
    let msg = err.to_string();
    assert!(msg.contains("bucket does not exist"), "Should contain detail: {msg}");
}

#[test]
fn io_error_converts() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no access");
    let err: IngestError = io_err.into();
    let msg = err.to_string();
    assert!(msg.contains("no access"), "Should preserve IO error: {msg}");
}

#[test]
fn timestamp_error_displays_bare_reason() {
    assert_eq!(
        TimestampError::LeapSecond.to_string(),
        "second 60 is not a valid time of day"
    );
    let err: IngestError = TimestampError::OutOfRange.into();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn storage_failure_body() {
    let err = HandlerError::Storage(IngestError::Storage("timeout".into()));
    assert_eq!(err.status_code(), 500);
    assert_eq!(
        err.to_body(),
        json!({
            "message": "failed to put object to S3",
            "error": "Object store error: timeout",
        })
    );
}

#[test]
fn configuration_failure_body() {
    let err = HandlerError::Configuration {
        name: "/logonlogoff/prefixkey".into(),
        source: parameter_err("/logonlogoff/prefixkey", "parameter not found"),
    };
    assert_eq!(err.status_code(), 500);
    let body = err.to_body();
    assert_eq!(body["message"], json!("failed to get parameter"));
    assert_eq!(body["name"], json!("/logonlogoff/prefixkey"));
}

#[test]
fn rejection_maps_to_400() {
    let err: HandlerError = Rejection::InvalidUserid {
        value: "user!!".into(),
    }
    .into();
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.to_string(), "invalid userid");
}

#[test]
fn errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IngestError>();
    assert_send_sync::<HandlerError>();
}
