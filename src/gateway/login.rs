/**
 * Login Flow
 *
 * One linear pass per attempt, no retries:
 *
 * ```text
 * Received -> Delegating -> Verified -> Issuing -> Succeeded
 *                        \-> Rejected ------------> Failed
 *                        \-> TransportError ------> Failed
 * ```
 *
 * Each transition is logged on the `login` span. A username that fails the
 * syntax rule is rejected at `Received` without calling the Credential
 * Store; it gets the same 401 as any other rejection.
 */

use std::fmt;
use std::sync::Arc;

use crate::gateway::client::{UpstreamError, UserServiceClient};
use crate::gateway::error::LoginError;
use crate::gateway::token::TokenIssuer;
use crate::store::validation::is_valid_username;

/// Step of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPhase {
    Received,
    Delegating,
    Verified,
    Issuing,
    Succeeded,
    Rejected,
    TransportError,
    Failed,
}

impl LoginPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Delegating => "delegating",
            Self::Verified => "verified",
            Self::Issuing => "issuing",
            Self::Succeeded => "succeeded",
            Self::Rejected => "rejected",
            Self::TransportError => "transport_error",
            Self::Failed => "failed",
        }
    }

    /// Whether `next` may follow this phase
    pub fn can_advance_to(self, next: LoginPhase) -> bool {
        use LoginPhase::*;
        matches!(
            (self, next),
            (Received, Delegating)
                | (Received, Rejected)
                | (Delegating, Verified)
                | (Delegating, Rejected)
                | (Delegating, TransportError)
                | (Verified, Issuing)
                | (Issuing, Succeeded)
                | (Issuing, Failed)
                | (Rejected, Failed)
                | (TransportError, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for LoginPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records the phases of one attempt
#[derive(Debug)]
struct PhaseTrace {
    current: LoginPhase,
    path: Vec<LoginPhase>,
}

impl PhaseTrace {
    fn start() -> Self {
        tracing::debug!(phase = %LoginPhase::Received, "Login phase");
        Self {
            current: LoginPhase::Received,
            path: vec![LoginPhase::Received],
        }
    }

    fn advance(&mut self, next: LoginPhase) {
        debug_assert!(
            self.current.can_advance_to(next),
            "illegal login transition {} -> {}",
            self.current,
            next
        );
        tracing::debug!(from = %self.current, phase = %next, "Login phase");
        self.current = next;
        self.path.push(next);
    }
}

/// Exchanges credentials for a token
#[derive(Debug, Clone)]
pub struct LoginService {
    client: UserServiceClient,
    issuer: Arc<TokenIssuer>,
}

impl LoginService {
    pub fn new(client: UserServiceClient, issuer: TokenIssuer) -> Self {
        Self {
            client,
            issuer: Arc::new(issuer),
        }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Authenticate `username` and issue a token
    ///
    /// # Returns
    /// A signed token whose `sub` is `username`
    ///
    /// # Errors
    /// * `InvalidCredentials` - Rejected locally or by the Credential Store
    /// * `Upstream` - No verdict from the Credential Store
    /// * `Token` - Signing failed
    #[tracing::instrument(name = "login", skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, LoginError> {
        self.login_traced(username, password)
            .await
            .map(|(token, _)| token)
            .map_err(|(err, _)| err)
    }

    /// `login`, also returning the phases the attempt went through
    async fn login_traced(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, Vec<LoginPhase>), (LoginError, Vec<LoginPhase>)> {
        let mut trace = PhaseTrace::start();

        if !is_valid_username(username) {
            trace.advance(LoginPhase::Rejected);
            trace.advance(LoginPhase::Failed);
            return Err((LoginError::InvalidCredentials, trace.path));
        }

        trace.advance(LoginPhase::Delegating);
        match self.client.verify_credentials(username, password).await {
            Ok(()) => trace.advance(LoginPhase::Verified),
            Err(UpstreamError::InvalidCredentials) => {
                trace.advance(LoginPhase::Rejected);
                trace.advance(LoginPhase::Failed);
                tracing::debug!("Login rejected");
                return Err((LoginError::InvalidCredentials, trace.path));
            }
            Err(err) => {
                trace.advance(LoginPhase::TransportError);
                trace.advance(LoginPhase::Failed);
                return Err((LoginError::Upstream(err), trace.path));
            }
        }

        trace.advance(LoginPhase::Issuing);
        match self.issuer.issue(username) {
            Ok(token) => {
                trace.advance(LoginPhase::Succeeded);
                tracing::info!("Login succeeded");
                Ok((token, trace.path))
            }
            Err(err) => {
                trace.advance(LoginPhase::Failed);
                Err((err.into(), trace.path))
            }
        }
    }
}
