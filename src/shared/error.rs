//! Shared Error Body
//!
//! Every non-2xx JSON response from either service has the same shape:
//!
//! ```json
//! { "error": "invalid credentials" }
//! ```
//!
//! The message is always one of a small set of fixed strings chosen by the
//! caller. Nothing derived from an internal error (database text, upstream
//! status, bcrypt failure) is ever placed in it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Boxed source for server-side failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Public message for anything the client cannot act on.
pub const SERVER_ERROR: &str = "server error";

/// Public message for malformed request bodies.
pub const INVALID_JSON: &str = "invalid json";

/// JSON error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Fixed, client-facing reason
    pub error: String,
}

impl ErrorBody {
    /// Create a new error body
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Build a JSON error response with the given status and fixed message
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
