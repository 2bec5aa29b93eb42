/**
 * Credential Store State
 *
 * Everything a handler needs: the `CredentialStore` (which owns the pool)
 * and the per-request database budget. Both are cheap to clone; no handler
 * takes a lock.
 */

use std::time::Duration;

use crate::shared::Deadline;
use crate::store::credentials::CredentialStore;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct StoreState {
    pub credentials: CredentialStore,
    pub query_timeout: Duration,
}

impl StoreState {
    pub fn new(credentials: CredentialStore, query_timeout: Duration) -> Self {
        Self {
            credentials,
            query_timeout,
        }
    }

    /// A fresh deadline for one request's database work
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.query_timeout)
    }
}
