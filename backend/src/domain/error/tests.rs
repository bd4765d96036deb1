//! Tests for the domain error payload and its serde contract.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("Make and model are required")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no key"), ErrorCode::Unauthorized)]
#[case(Error::not_found("Car not found"), ErrorCode::NotFound)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(base_error: Error) {
    let value = serde_json::to_value(base_error).expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "invalid_request", "message": "Make and model are required" })
    );
}

#[rstest]
fn serialises_trace_id_and_details(base_error: Error) {
    let error = base_error
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "make" }));
    let value = serde_json::to_value(error).expect("serialise error");
    assert_eq!(value["traceId"], TRACE_ID);
    assert_eq!(value["details"]["field"], "make");
}

#[rstest]
fn deserialise_rejects_blank_message() {
    let payload = json!({ "code": "not_found", "message": " " });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn deserialise_accepts_snake_case_trace_alias() {
    let payload = json!({ "code": "not_found", "message": "User not found", "trace_id": TRACE_ID });
    let error: Error = serde_json::from_value(payload).expect("valid payload");
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn without_details_clears_details() {
    let error = Error::internal("boom")
        .with_details(json!({ "trace": "stack" }))
        .without_details();
    assert!(error.details().is_none());
}
