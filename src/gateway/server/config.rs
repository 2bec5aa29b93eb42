/**
 * Login Gateway Configuration
 *
 * | Variable              | Required | Default        |
 * |-----------------------|----------|----------------|
 * | `ADDR`                | no       | `0.0.0.0:8082` |
 * | `USER_SERVICE_URL`    | yes      |                |
 * | `JWT_SECRET`          | yes      |                |
 * | `JWT_TTL_SECS`        | no       | `1800`         |
 * | `UPSTREAM_TIMEOUT_MS` | no       | `5000`         |
 *
 * `UPSTREAM_TIMEOUT_MS` must stay below `REQUEST_TIMEOUT` (15 s).
 */

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;

use crate::shared::config::{self, duration_ms_below, duration_secs, optional, required, Lookup};
use crate::shared::http::REQUEST_TIMEOUT;
use crate::shared::ConfigError;

/// Default listen address
pub const DEFAULT_ADDR: &str = "0.0.0.0:8082";

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Default bound on one Credential Store call
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_millis(5000);

/// Login Gateway settings
#[derive(Clone)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    /// Credential Store base URL
    pub user_service_url: Url,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub upstream_timeout: Duration,
}

impl GatewayConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&config::process_env)
    }

    /// Read configuration from any key/value source
    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        let default_addr: SocketAddr = DEFAULT_ADDR
            .parse()
            .map_err(|e| ConfigError::invalid("ADDR", e))?;

        let raw_url = required(lookup, "USER_SERVICE_URL")?;
        let user_service_url = Url::parse(raw_url.trim())
            .map_err(|e| ConfigError::InvalidUrl(format!("{raw_url}: {e}")))?;
        if !matches!(user_service_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{raw_url}: scheme must be http or https"
            )));
        }

        Ok(Self {
            addr: optional(lookup, "ADDR", default_addr)?,
            user_service_url,
            jwt_secret: required(lookup, "JWT_SECRET")?,
            token_ttl: duration_secs(lookup, "JWT_TTL_SECS", DEFAULT_TOKEN_TTL)?,
            upstream_timeout: duration_ms_below(
                lookup,
                "UPSTREAM_TIMEOUT_MS",
                DEFAULT_UPSTREAM_TIMEOUT,
                REQUEST_TIMEOUT,
            )?,
        })
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("addr", &self.addr)
            .field("user_service_url", &self.user_service_url.as_str())
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("USER_SERVICE_URL", "http://user-service:8080"),
        ("JWT_SECRET", "s3cret"),
    ];

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_lookup(&env(MINIMAL)).unwrap();
        assert_eq!(config.addr.port(), 8082);
        assert_eq!(config.user_service_url.as_str(), "http://user-service:8080/");
        assert_eq!(config.token_ttl, Duration::from_secs(1800));
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_required_values() {
        assert_eq!(
            GatewayConfig::from_lookup(&env(&[("JWT_SECRET", "s3cret")])).unwrap_err(),
            ConfigError::MissingValue("USER_SERVICE_URL")
        );
        assert_eq!(
            GatewayConfig::from_lookup(&env(&[("USER_SERVICE_URL", "http://x")])).unwrap_err(),
            ConfigError::MissingValue("JWT_SECRET")
        );
    }

    #[test]
    fn test_invalid_url() {
        let bad = env(&[("USER_SERVICE_URL", "not a url"), ("JWT_SECRET", "s3cret")]);
        assert!(matches!(
            GatewayConfig::from_lookup(&bad),
            Err(ConfigError::InvalidUrl(_))
        ));

        let ftp = env(&[("USER_SERVICE_URL", "ftp://store"), ("JWT_SECRET", "s3cret")]);
        assert!(matches!(
            GatewayConfig::from_lookup(&ftp),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = MINIMAL.to_vec();
        pairs.extend([("JWT_TTL_SECS", "60"), ("UPSTREAM_TIMEOUT_MS", "750")]);
        let config = GatewayConfig::from_lookup(&env(&pairs)).unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.upstream_timeout, Duration::from_millis(750));
    }

    #[test]
    fn test_upstream_timeout_must_fit_in_request_timeout() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("UPSTREAM_TIMEOUT_MS", "20000"));
        assert!(matches!(
            GatewayConfig::from_lookup(&env(&pairs)),
            Err(ConfigError::InvalidValue { key: "UPSTREAM_TIMEOUT_MS", .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = GatewayConfig::from_lookup(&env(MINIMAL)).unwrap();
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
