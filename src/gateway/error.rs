/**
 * Login Gateway Errors
 *
 * | Error                | Status | Body                            |
 * |----------------------|--------|---------------------------------|
 * | `InvalidCredentials` | 401    | {"error":"invalid credentials"} |
 * | `Upstream`           | 500    | {"error":"server error"}        |
 * | `Token`              | 500    | {"error":"server error"}        |
 *
 * Sources are logged when the response is rendered and never returned.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::client::UpstreamError;
use crate::gateway::token::TokenError;
use crate::shared::error::{error_response, SERVER_ERROR};

/// Public message for any rejected login
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Failure of a login attempt
#[derive(Debug, Error)]
pub enum LoginError {
    /// Wrong password, unknown user or malformed username
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The Credential Store could not give a verdict
    #[error("credential store unavailable")]
    Upstream(#[source] UpstreamError),

    /// Signing failed
    #[error("token issuance failed")]
    Token(#[from] TokenError),
}

impl LoginError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for LoginError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::InvalidCredentials => Self::InvalidCredentials,
            other => Self::Upstream(other),
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::InvalidCredentials => error_response(status, INVALID_CREDENTIALS),
            Self::Upstream(source) => {
                tracing::error!(error = %source, "Login failed: credential store unavailable");
                error_response(status, SERVER_ERROR)
            }
            Self::Token(source) => {
                tracing::error!(error = %source, "Login failed: token issuance");
                error_response(status, SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: LoginError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_credentials() {
        let (status, body) = render(LoginError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({ "error": "invalid credentials" }));
    }

    #[tokio::test]
    async fn test_upstream_detail_is_hidden() {
        let err = LoginError::from(UpstreamError::UnexpectedStatus(StatusCode::BAD_GATEWAY));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "server error" }));
    }

    #[test]
    fn test_upstream_rejection_becomes_invalid_credentials() {
        assert!(matches!(
            LoginError::from(UpstreamError::InvalidCredentials),
            LoginError::InvalidCredentials
        ));
    }
}
