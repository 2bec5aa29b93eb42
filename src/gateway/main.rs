/**
 * Login Gateway Entry Point
 *
 * Loads `.env` if present, initialises tracing, reads `GatewayConfig` and
 * serves until SIGINT/SIGTERM.
 */

use credgate::gateway::server::{serve, GatewayConfig};
use credgate::shared::telemetry::init_tracing;
use credgate::shared::BoxError;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    init_tracing("login-gateway");

    let config = GatewayConfig::from_env()?;
    tracing::info!(?config, "Starting login gateway");

    serve(config).await?;

    Ok(())
}
