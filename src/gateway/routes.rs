//! Login Gateway routes: `POST /login` and `GET /healthz`.

use axum::{
    routing::{get, post},
    Router,
};

use crate::gateway::handlers::{healthz, login};
use crate::gateway::server::state::GatewayState;

pub fn gateway_routes() -> Router<GatewayState> {
    Router::new()
        .route("/login", post(login))
        .route("/healthz", get(healthz))
}
