/**
 * Credential Store Entry Point
 *
 * Loads `.env` if present, initialises tracing, reads `StoreConfig` and
 * serves until SIGINT/SIGTERM.
 */

use credgate::shared::telemetry::init_tracing;
use credgate::shared::BoxError;
use credgate::store::server::{serve, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    init_tracing("credential-store");

    let config = StoreConfig::from_env()?;
    tracing::info!(?config, "Starting credential store");

    serve(config).await?;

    Ok(())
}
