//! Response assertions

use axum::http::StatusCode;
use axum_test::TestResponse;
use credgate::shared::ErrorBody;

/// Assert a JSON error response with the given status and message
#[track_caller]
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    let body: ErrorBody = response.json();
    assert_eq!(body.error, message);
}

/// Assert two responses are identical in status and body bytes
#[track_caller]
pub fn assert_same_response(left: &TestResponse, right: &TestResponse) {
    assert_eq!(left.status_code(), right.status_code());
    assert_eq!(left.as_bytes(), right.as_bytes());
}
