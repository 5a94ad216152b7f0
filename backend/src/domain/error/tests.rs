//! Tests for the domain error payload and its wire format.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let err = Error::new(ErrorCode::InternalError, "");
    assert_eq!(err.message(), "Unexpected error");
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[case(ErrorCode::InvalidEmailFormat, ErrorKind::Validation)]
#[case(ErrorCode::UnknownOrganization, ErrorKind::Validation)]
#[case(ErrorCode::EmailAlreadyExists, ErrorKind::Conflict)]
#[case(ErrorCode::DocumentAlreadyExists, ErrorKind::Conflict)]
#[case(ErrorCode::Unauthorized, ErrorKind::Unauthorized)]
#[case(ErrorCode::NotFound, ErrorKind::NotFound)]
#[case(ErrorCode::ServiceUnavailable, ErrorKind::Unavailable)]
#[case(ErrorCode::InternalError, ErrorKind::Internal)]
fn codes_belong_to_expected_kind(#[case] code: ErrorCode, #[case] kind: ErrorKind) {
    assert_eq!(code.kind(), kind);
}

#[rstest]
fn serialises_message_under_error_key() {
    let err = Error::validation(ErrorCode::InvalidName, "name", "Name is required");
    let value = serde_json::to_value(&err).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "error": "Name is required",
            "code": "INVALID_NAME",
            "details": { "field": "name" },
        })
    );
}

#[rstest]
fn serialises_trace_id_in_camel_case(expected_trace_id: String) {
    let err = Error::not_found("missing").with_trace_id(expected_trace_id.clone());
    let value = serde_json::to_value(&err).expect("error serialises");

    assert_eq!(value["traceId"], json!(expected_trace_id));
    assert_eq!(value["code"], json!("NOT_FOUND"));
}

#[rstest]
#[tokio::test]
async fn deserialising_keeps_payload_trace_not_ambient(expected_trace_id: String) {
    let ambient: TraceId = "11111111-1111-1111-1111-111111111111"
        .parse()
        .expect("valid UUID");
    let payload = json!({
        "error": "bad",
        "code": "INVALID_REQUEST",
        "traceId": expected_trace_id,
    });

    let error: Error = TraceId::scope(ambient, async move {
        serde_json::from_value(payload).expect("payload deserialises")
    })
    .await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let payload = json!({ "error": " ", "code": "INVALID_REQUEST" });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}
