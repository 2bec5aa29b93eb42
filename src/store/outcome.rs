/**
 * Operation Outcomes
 *
 * Every Credential Store endpoint answers with exactly one `Outcome`. The
 * mapping from outcome to status code and body lives in one exhaustive
 * `match` below, with no wildcard arm. A new variant does not compile until
 * someone decides how it looks on the wire.
 *
 * | Outcome            | Status | Body                              |
 * |--------------------|--------|-----------------------------------|
 * | Created            | 201    | {"status":"created"}              |
 * | Verified           | 204    | (empty)                           |
 * | InvalidIdentifier  | 400    | {"error":"invalid username"}      |
 * | InvalidSecret      | 400    | {"error":"invalid password"}      |
 * | InvalidCredentials | 401    | {"error":"invalid credentials"}   |
 * | NotFound           | 401    | {"error":"invalid credentials"}   |
 * | AlreadyExists      | 409    | {"error":"user already exists"}   |
 * | ServerError        | 500    | {"error":"server error"}          |
 *
 * `NotFound` shares the `InvalidCredentials` response on purpose. It only
 * arises from the in-process hash lookup, but if it ever reached the wire it
 * must not tell an unknown user apart from a wrong password.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::shared::error::{error_response, SERVER_ERROR};

/// Successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Created;

/// Successful verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verified;

/// Body of a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// Tagged result of a Credential Store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Verified,
    InvalidIdentifier,
    InvalidSecret,
    AlreadyExists,
    InvalidCredentials,
    NotFound,
    ServerError,
}

impl Outcome {
    /// HTTP status for this outcome
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Created => StatusCode::CREATED,
            Self::Verified => StatusCode::NO_CONTENT,
            Self::InvalidIdentifier => StatusCode::BAD_REQUEST,
            Self::InvalidSecret => StatusCode::BAD_REQUEST,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::UNAUTHORIZED,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Public error message, `None` for successes
    pub fn error_message(self) -> Option<&'static str> {
        match self {
            Self::Created => None,
            Self::Verified => None,
            Self::InvalidIdentifier => Some("invalid username"),
            Self::InvalidSecret => Some("invalid password"),
            Self::AlreadyExists => Some("user already exists"),
            Self::InvalidCredentials => Some("invalid credentials"),
            Self::NotFound => Some("invalid credentials"),
            Self::ServerError => Some(SERVER_ERROR),
        }
    }
}

impl From<Created> for Outcome {
    fn from(_: Created) -> Self {
        Self::Created
    }
}

impl From<Verified> for Outcome {
    fn from(_: Verified) -> Self {
        Self::Verified
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match (self, self.error_message()) {
            (Self::Created, _) => (
                status,
                Json(StatusBody {
                    status: "created".to_string(),
                }),
            )
                .into_response(),
            (_, Some(message)) => error_response(status, message),
            (_, None) => status.into_response(),
        }
    }
}
