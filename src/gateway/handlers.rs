/**
 * Login Gateway Handlers
 *
 * - `POST /login` - exchange `{"username","password"}` for `{"token"}`
 * - `GET /healthz` - liveness
 */

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::gateway::error::LoginError;
use crate::gateway::server::state::GatewayState;
use crate::shared::StrictJson;

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Login handler
///
/// # Returns
///
/// * `200 {"token": ...}` - Credentials verified
/// * `401 {"error":"invalid credentials"}` - Wrong password, unknown user or
///   malformed username, indistinguishably
/// * `400 {"error":"invalid json"}` - Body rejected by `StrictJson`
/// * `500 {"error":"server error"}` - Credential Store unreachable or signing failed
pub async fn login(
    State(state): State<GatewayState>,
    StrictJson(request): StrictJson<LoginRequest>,
) -> Result<Json<TokenResponse>, LoginError> {
    let token = state
        .login
        .login(&request.username, &request.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// Liveness
pub async fn healthz() -> &'static str {
    "ok"
}
