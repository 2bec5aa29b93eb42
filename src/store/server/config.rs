/**
 * Credential Store Configuration
 *
 * | Variable              | Required | Default        |
 * |-----------------------|----------|----------------|
 * | `ADDR`                | no       | `0.0.0.0:8080` |
 * | `INTERNAL_ADDR`       | no       | unset          |
 * | `DATABASE_URL`        | yes      |                |
 * | `DB_QUERY_TIMEOUT_MS` | no       | `5000`         |
 *
 * `DATABASE_URL` accepts `postgres://` and `sqlite:` URLs.
 * `DB_QUERY_TIMEOUT_MS` must stay below the whole-request timeout
 * (`REQUEST_TIMEOUT`, 15 s).
 */

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::shared::config::{self, duration_ms_below, optional, required, Lookup};
use crate::shared::http::REQUEST_TIMEOUT;
use crate::shared::ConfigError;

/// Default public listen address
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Default bound on a single database call
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Credential Store settings
#[derive(Clone)]
pub struct StoreConfig {
    /// Public listener
    pub addr: SocketAddr,
    /// Separate listener for `/internal/*`, if any
    pub internal_addr: Option<SocketAddr>,
    pub database_url: String,
    pub query_timeout: Duration,
}

impl StoreConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&config::process_env)
    }

    /// Read configuration from any key/value source
    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        let default_addr: SocketAddr = DEFAULT_ADDR
            .parse()
            .map_err(|e| ConfigError::invalid("ADDR", e))?;

        let internal_addr = match lookup.get("INTERNAL_ADDR") {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse()
                    .map_err(|e| ConfigError::invalid("INTERNAL_ADDR", e))?,
            ),
            _ => None,
        };

        Ok(Self {
            addr: optional(lookup, "ADDR", default_addr)?,
            internal_addr,
            database_url: required(lookup, "DATABASE_URL")?,
            query_timeout: duration_ms_below(
                lookup,
                "DB_QUERY_TIMEOUT_MS",
                DEFAULT_QUERY_TIMEOUT,
                REQUEST_TIMEOUT,
            )?,
        })
    }
}

// The database URL may embed a password
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("addr", &self.addr)
            .field("internal_addr", &self.internal_addr)
            .field("database_url", &"<redacted>")
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}
