/**
 * Credential Store Handlers
 *
 * Thin HTTP adapters over `CredentialStore`. Each handler decodes its body
 * with `StrictJson`, builds a request deadline from the configured query
 * timeout, runs one domain operation and renders the resulting `Outcome`.
 *
 * # Endpoints
 *
 * - `POST /users` - `register`
 * - `POST /internal/users/{username}/verify` - `verify_internal`
 * - `GET /livez`, `GET /healthz` - `livez`
 * - `GET /readyz` - `readyz`
 */

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::shared::error::error_response;
use crate::shared::StrictJson;
use crate::store::outcome::Outcome;
use crate::store::server::state::StoreState;

/// Readiness answers within this budget or reports not ready
pub const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /internal/users/{username}/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyRequest {
    pub password: String,
}

/// Registration handler
///
/// Surrounding whitespace is stripped from the username before validation.
/// The password is used exactly as sent.
///
/// # Returns
///
/// * `201 {"status":"created"}` - User registered
/// * `400` - Invalid username or password
/// * `409` - Username already taken
/// * `500` - Hashing or database failure
pub async fn register(
    State(state): State<StoreState>,
    StrictJson(request): StrictJson<RegisterRequest>,
) -> Outcome {
    let result = state
        .credentials
        .register(state.deadline(), request.username.trim(), &request.password)
        .await;
    Outcome::from_result(result)
}

/// Internal verification handler, consumed by the Login Gateway
///
/// # Returns
///
/// * `204` - Password matches
/// * `401 {"error":"invalid credentials"}` - Wrong password or unknown user
/// * `400 {"error":"invalid username"}` - Username fails the syntax rule
/// * `500` - Database failure or deadline
pub async fn verify_internal(
    State(state): State<StoreState>,
    Path(username): Path<String>,
    StrictJson(request): StrictJson<VerifyRequest>,
) -> Outcome {
    let result = state
        .credentials
        .verify(state.deadline(), &username, &request.password)
        .await;
    Outcome::from_result(result)
}

/// Liveness: the process is up and serving
pub async fn livez() -> &'static str {
    "ok"
}

/// Readiness: the database answers `SELECT 1` in time
pub async fn readyz(State(state): State<StoreState>) -> Response {
    let deadline = state.deadline().tighten(READINESS_TIMEOUT);
    match deadline.run(state.credentials.database().ping()).await {
        Ok(Ok(())) => "ok".into_response(),
        Ok(Err(e)) => {
            tracing::warn!("Readiness check failed: {}", e);
            error_response(StatusCode::SERVICE_UNAVAILABLE, "not ready")
        }
        Err(_) => {
            tracing::warn!("Readiness check timed out");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "not ready")
        }
    }
}
