/**
 * Login Gateway Initialization
 *
 * 1. Build the Credential Store client (with the upstream timeout)
 * 2. Build the token issuer from `JWT_SECRET` and the TTL
 * 3. Assemble the router under the standard middleware stack
 * 4. Serve until SIGINT/SIGTERM
 */

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;

use crate::gateway::client::UserServiceClient;
use crate::gateway::login::LoginService;
use crate::gateway::routes::gateway_routes;
use crate::gateway::server::config::GatewayConfig;
use crate::gateway::server::state::GatewayState;
use crate::gateway::token::TokenIssuer;
use crate::shared::error::BoxError;
use crate::shared::http::{shutdown_signal, with_standard_layers};

/// Build handler state from configuration
///
/// # Errors
///
/// The HTTP client cannot be built or the TTL is out of range.
pub fn build_state(config: &GatewayConfig) -> Result<GatewayState, BoxError> {
    let client = UserServiceClient::new(config.user_service_url.clone(), config.upstream_timeout)?;
    let issuer = TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl)?;
    Ok(GatewayState::new(LoginService::new(client, issuer)))
}

/// The gateway router
pub fn create_app(state: GatewayState) -> Router {
    with_standard_layers(gateway_routes().with_state(state))
}

/// Run the Login Gateway until SIGINT/SIGTERM
pub async fn serve(config: GatewayConfig) -> Result<(), BoxError> {
    let state = build_state(&config)?;
    let listener = TcpListener::bind(config.addr).await?;
    serve_on(state, listener, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves
pub async fn serve_on<S>(state: GatewayState, listener: TcpListener, shutdown: S) -> Result<(), BoxError>
where
    S: Future<Output = ()> + Send + 'static,
{
    tracing::info!("Login gateway listening on {}", listener.local_addr()?);
    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Login gateway stopped");
    Ok(())
}
