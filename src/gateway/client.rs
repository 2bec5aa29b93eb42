/**
 * Credential Store Client
 *
 * The Login Gateway's only view of the Credential Store: one call to the
 * verify-only internal endpoint. The client never receives a hash.
 *
 * # Status Mapping
 *
 * | Upstream status     | Result                      |
 * |---------------------|-----------------------------|
 * | 204, 200            | `Ok(())`                    |
 * | 401, 404, 400       | `InvalidCredentials`        |
 * | anything else       | `UnexpectedStatus`          |
 * | no response/timeout | `Transport`                 |
 *
 * Each call is attempted once. The reqwest client carries the per-request
 * timeout, so a hung Credential Store surfaces as `Transport`.
 */

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use thiserror::Error;

/// Failure talking to the Credential Store
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The store rejected the credentials (or the username)
    #[error("credentials rejected by credential store")]
    InvalidCredentials,

    /// The store answered with a status outside the contract
    #[error("unexpected status from credential store: {0}")]
    UnexpectedStatus(StatusCode),

    /// Connection, timeout or protocol failure
    #[error("credential store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The base URL cannot carry a path
    #[error("credential store URL cannot be a base: {0}")]
    InvalidBaseUrl(Url),
}

#[derive(Serialize)]
struct VerifyBody<'a> {
    password: &'a str,
}

/// HTTP client for `POST /internal/users/{username}/verify`
#[derive(Debug, Clone)]
pub struct UserServiceClient {
    http: Client,
    base_url: Url,
}

impl UserServiceClient {
    /// Build a client with a per-request timeout
    ///
    /// # Arguments
    /// * `base_url` - Credential Store root, e.g. `http://127.0.0.1:8080`
    /// * `timeout` - Bound on one verification call, connect included
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, UpstreamError> {
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(base_url));
        }

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the verify endpoint for `username`
    ///
    /// The username is appended as one percent-encoded path segment, so it
    /// can never change the route it lands on.
    pub fn verify_url(&self, username: &str) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["internal", "users", username, "verify"]);
        Ok(url)
    }

    /// Ask the Credential Store whether `password` is right for `username`
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - Rejected (wrong password or unknown user)
    /// * `UnexpectedStatus` - Any status outside the contract
    /// * `Transport` - No usable response within the timeout
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), UpstreamError> {
        let url = self.verify_url(username)?;

        let response = self
            .http
            .post(url)
            .json(&VerifyBody { password })
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
                Err(UpstreamError::InvalidCredentials)
            }
            status => Err(UpstreamError::UnexpectedStatus(status)),
        }
    }
}
