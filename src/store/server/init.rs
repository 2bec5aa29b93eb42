/**
 * Credential Store Initialization
 *
 * # Initialization Process
 *
 * 1. Connect to `DATABASE_URL` and run the embedded migrations
 * 2. Wrap the pool in a `CredentialStore`
 * 3. Build the public and internal routers, each under the standard
 *    middleware stack
 * 4. Serve one listener (both route sets) or two (`INTERNAL_ADDR` set)
 * 5. On shutdown, drain both listeners and close the pool
 *
 * Any failure before the first `accept` aborts startup.
 */

use std::future::{Future, IntoFuture};

use axum::Router;
use futures_util::FutureExt;
use tokio::net::TcpListener;

use crate::shared::error::BoxError;
use crate::shared::http::{shutdown_signal, with_standard_layers};
use crate::store::credentials::CredentialStore;
use crate::store::db::Database;
use crate::store::routes::{internal_routes, public_routes};
use crate::store::server::config::StoreConfig;
use crate::store::server::state::StoreState;

/// Connect to the database, migrate it and build handler state
///
/// # Errors
///
/// Connection or migration failure.
pub async fn build_state(config: &StoreConfig) -> Result<StoreState, BoxError> {
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running database migrations...");
    db.migrate().await?;
    tracing::info!("Database ready");

    Ok(StoreState::new(CredentialStore::new(db), config.query_timeout))
}

/// Both route sets on one router
pub fn create_app(state: StoreState) -> Router {
    with_standard_layers(public_routes().merge(internal_routes()).with_state(state))
}

/// Public routes only, for a split deployment
pub fn create_public_app(state: StoreState) -> Router {
    with_standard_layers(public_routes().with_state(state))
}

/// Internal routes only, for a split deployment
pub fn create_internal_app(state: StoreState) -> Router {
    with_standard_layers(internal_routes().with_state(state))
}

/// Run the Credential Store until SIGINT/SIGTERM
///
/// # Errors
///
/// Database bootstrap, bind or serve failure.
pub async fn serve(config: StoreConfig) -> Result<(), BoxError> {
    let state = build_state(&config).await?;

    let public = TcpListener::bind(config.addr).await?;
    let internal = match config.internal_addr {
        Some(addr) => Some(TcpListener::bind(addr).await?),
        None => None,
    };

    serve_on(state, public, internal, shutdown_signal()).await
}

/// Serve on already-bound listeners until `shutdown` resolves
///
/// With `internal` set, `/internal/*` is routed only there. The database pool
/// is closed once every listener has drained.
pub async fn serve_on<S>(
    state: StoreState,
    public: TcpListener,
    internal: Option<TcpListener>,
    shutdown: S,
) -> Result<(), BoxError>
where
    S: Future<Output = ()> + Send + 'static,
{
    let db = state.credentials.database().clone();
    let shutdown = shutdown.boxed().shared();

    match internal {
        None => {
            tracing::info!("Credential store listening on {}", public.local_addr()?);
            axum::serve(public, create_app(state))
                .with_graceful_shutdown(shutdown)
                .await?;
        }
        Some(internal) => {
            tracing::info!(
                "Credential store listening on {} (public) and {} (internal)",
                public.local_addr()?,
                internal.local_addr()?
            );
            let public_server = axum::serve(public, create_public_app(state.clone()))
                .with_graceful_shutdown(shutdown.clone())
                .into_future();
            let internal_server = axum::serve(internal, create_internal_app(state))
                .with_graceful_shutdown(shutdown)
                .into_future();
            tokio::try_join!(public_server, internal_server)?;
        }
    }

    db.close().await;
    tracing::info!("Credential store stopped");
    Ok(())
}
