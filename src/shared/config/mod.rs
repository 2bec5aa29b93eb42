//! Configuration helpers
//!
//! Both services are configured from environment variables (optionally seeded
//! from a `.env` file by the binaries). Readers take a lookup function rather
//! than touching the process environment directly, so configuration parsing
//! can be tested with a plain map.
//!
//! A missing required value or an unparsable value is a startup error; the
//! binaries exit before binding any socket.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.to_string(),
        }
    }
}

/// Source of configuration values, keyed by variable name
pub trait Lookup {
    fn get(&self, key: &str) -> Option<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Lookup backed by the process environment
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read a required, non-empty value
pub fn required(lookup: &impl Lookup, key: &'static str) -> Result<String, ConfigError> {
    match lookup.get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingValue(key)),
    }
}

/// Read an optional value, parsing it when present
pub fn optional<T>(lookup: &impl Lookup, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup.get(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e| ConfigError::invalid(key, e))
        }
        _ => Ok(default),
    }
}

/// Read an optional, strictly positive duration expressed in milliseconds
pub fn duration_ms(
    lookup: &impl Lookup,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let millis: u64 = optional(lookup, key, default.as_millis() as u64)?;
    if millis == 0 {
        return Err(ConfigError::invalid(key, "must be greater than zero"));
    }
    Ok(Duration::from_millis(millis))
}

/// `duration_ms`, additionally required to be strictly below `limit`
pub fn duration_ms_below(
    lookup: &impl Lookup,
    key: &'static str,
    default: Duration,
    limit: Duration,
) -> Result<Duration, ConfigError> {
    let value = duration_ms(lookup, key, default)?;
    if value >= limit {
        return Err(ConfigError::invalid(
            key,
            format!("must be below {}ms", limit.as_millis()),
        ));
    }
    Ok(value)
}

/// Read an optional, strictly positive duration expressed in seconds
pub fn duration_secs(
    lookup: &impl Lookup,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let secs: u64 = optional(lookup, key, default.as_secs())?;
    if secs == 0 {
        return Err(ConfigError::invalid(key, "must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
