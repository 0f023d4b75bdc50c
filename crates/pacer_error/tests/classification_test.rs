//! Tests for transient/permanent error classification.

use pacer_error::{ApiError, ApiErrorKind, ErrorClass, RetryableError};

fn http(status_code: u16, message: &str) -> ApiError {
    ApiError::new(ApiErrorKind::HttpStatus {
        status_code,
        message: message.to_string(),
    })
}

#[test]
fn test_timeouts_are_transient() {
    let err = ApiError::new(ApiErrorKind::Timeout);
    assert_eq!(err.classify(), ErrorClass::Transient);
    assert!(err.is_retryable());
}

#[test]
fn test_connection_failures_are_transient() {
    let err = ApiError::new(ApiErrorKind::Connection("connection refused".to_string()));
    assert_eq!(err.classify(), ErrorClass::Transient);
}

#[test]
fn test_retryable_status_codes() {
    for status in [429, 502, 503, 504] {
        assert_eq!(
            http(status, "error").classify(),
            ErrorClass::Transient,
            "status {} should be transient",
            status
        );
    }
}

#[test]
fn test_client_errors_are_permanent() {
    for status in [400, 401, 403, 404] {
        assert_eq!(
            http(status, "error").classify(),
            ErrorClass::Permanent,
            "status {} should be permanent",
            status
        );
    }
}

#[test]
fn test_provider_unavailability_descriptions_are_transient() {
    let err = ApiError::new(ApiErrorKind::Provider("Bad Gateway".to_string()));
    assert_eq!(err.classify(), ErrorClass::Transient);

    let err = ApiError::new(ApiErrorKind::Provider("Service Unavailable".to_string()));
    assert_eq!(err.classify(), ErrorClass::Transient);
}

#[test]
fn test_provider_domain_errors_are_permanent() {
    for description in [
        "Bad Request: chat not found",
        "Bad Request: message to edit not found",
        "Unauthorized",
    ] {
        let err = ApiError::new(ApiErrorKind::Provider(description.to_string()));
        assert_eq!(
            err.classify(),
            ErrorClass::Permanent,
            "{:?} should be permanent",
            description
        );
        assert!(!err.is_retryable());
    }
}

// Unmatched error shapes must fail fast rather than retry indefinitely.
#[test]
fn test_classifier_defaults_unknown_to_permanent() {
    let err = ApiError::new(ApiErrorKind::Request("something new".to_string()));
    assert_eq!(err.classify(), ErrorClass::Permanent);

    let err = ApiError::new(ApiErrorKind::Decode("unexpected EOF".to_string()));
    assert_eq!(err.classify(), ErrorClass::Permanent);
}

#[test]
fn test_from_response_extracts_description() {
    let body = r#"{"ok": false, "error_code": 502, "description": "Bad Gateway"}"#;
    let err = ApiError::from_response(502, body);
    assert_eq!(err.classify(), ErrorClass::Transient);
    match &err.kind {
        ApiErrorKind::HttpStatus {
            status_code,
            message,
        } => {
            assert_eq!(*status_code, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected kind: {:?}", other),
    }
}

#[test]
fn test_from_response_falls_back_to_raw_body() {
    let err = ApiError::from_response(500, "not json at all");
    match &err.kind {
        ApiErrorKind::HttpStatus { message, .. } => assert_eq!(message, "not json at all"),
        other => panic!("unexpected kind: {:?}", other),
    }
    // 500 is not in the retryable set for this provider.
    assert_eq!(err.classify(), ErrorClass::Permanent);
}

#[test]
fn test_status_with_unavailability_text_is_transient() {
    // Some gateways return unavailability text under unexpected codes.
    let err = http(500, "Service Unavailable");
    assert_eq!(err.classify(), ErrorClass::Transient);
}
