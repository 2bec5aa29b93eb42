//! Tracing initialisation for the service binaries.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info` for this crate
/// plus `tower_http` request traces. Calling this twice is harmless; the
/// second call is ignored.
pub fn init_tracing(service: &'static str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,credgate=info,tower_http=info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(service, "Tracing initialized");
    }
}
