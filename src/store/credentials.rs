/**
 * Credential Operations
 *
 * `CredentialStore` is the domain core of the Credential Store service:
 *
 * - `register` validates, hashes and inserts a new user
 * - `verify` checks a presented password and returns only a verdict
 * - `lookup_hash` fetches a stored hash; crate-private, it is what `verify`
 *   is built on and is never exposed over HTTP
 *
 * Every database call and every bcrypt run happens under the caller's
 * `Deadline`. Hashing runs on the blocking pool with no lock held, so any
 * number of requests can be in flight at once.
 *
 * # Enumeration Safety
 *
 * In `verify`, an unknown username becomes `InvalidCredentials`, exactly like
 * a wrong password. To keep the two paths close in cost, the unknown-user
 * path still performs one bcrypt comparison against a decoy hash.
 */

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::shared::Deadline;
use crate::store::db::{is_unique_violation, Database};
use crate::store::error::StoreError;
use crate::store::outcome::{Created, Verified};
use crate::store::password::PasswordHasher;
use crate::store::validation::{
    is_plausible_presented_password, is_valid_password, is_valid_username,
};

/// Plaintext behind the decoy hash. Never stored.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

/// Registration and verification over a database handle
#[derive(Debug, Clone)]
pub struct CredentialStore {
    db: Database,
    hasher: PasswordHasher,
    decoy_hash: Arc<OnceCell<String>>,
}

impl CredentialStore {
    /// Create a store over an injected database handle
    pub fn new(db: Database) -> Self {
        Self::with_hasher(db, PasswordHasher::new())
    }

    /// Create a store with an explicit hasher (tests use a low bcrypt cost)
    pub fn with_hasher(db: Database, hasher: PasswordHasher) -> Self {
        Self {
            db,
            hasher,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Register a new user
    ///
    /// # Arguments
    /// * `deadline` - Bound on hashing plus the database round trip
    /// * `username` - Requested username, used verbatim
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `InvalidIdentifier` - Username fails the syntax rule
    /// * `InvalidSecret` - Password shorter than 8 or longer than 128 characters
    /// * `AlreadyExists` - Username taken (reported by the database)
    /// * `Server` - Hashing failed, the database failed, or the deadline passed
    #[tracing::instrument(name = "register", skip(self, deadline, password))]
    pub async fn register(
        &self,
        deadline: Deadline,
        username: &str,
        password: &str,
    ) -> Result<Created, StoreError> {
        if !is_valid_username(username) {
            tracing::debug!("Rejected username");
            return Err(StoreError::InvalidIdentifier);
        }
        if !is_valid_password(password) {
            tracing::debug!("Rejected password length");
            return Err(StoreError::InvalidSecret);
        }

        let password_hash = deadline.run(self.hasher.hash(password)).await??;

        match deadline.run(self.db.insert_user(username, &password_hash)).await? {
            Ok(()) => {
                tracing::info!("User created");
                Ok(Created)
            }
            Err(err) if is_unique_violation(&err) => {
                tracing::info!("Username already taken");
                Err(StoreError::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Verify a presented password
    ///
    /// Returns only a verdict. The stored hash never leaves this function.
    ///
    /// # Errors
    /// * `InvalidIdentifier` - Username fails the syntax rule
    /// * `InvalidCredentials` - Wrong password, unknown user, or a presented
    ///   password that is empty or over 256 characters once trimmed
    /// * `Server` - Database failure, deadline, or a corrupt stored hash
    #[tracing::instrument(name = "verify", skip(self, deadline, password))]
    pub async fn verify(
        &self,
        deadline: Deadline,
        username: &str,
        password: &str,
    ) -> Result<Verified, StoreError> {
        if !is_valid_username(username) {
            return Err(StoreError::InvalidIdentifier);
        }
        if !is_plausible_presented_password(password) {
            return Err(StoreError::InvalidCredentials);
        }

        let stored_hash = match self.lookup_hash(deadline, username).await {
            Ok(hash) => hash,
            Err(StoreError::NotFound) => {
                self.burn_decoy_comparison(password).await;
                tracing::debug!("Verification failed");
                return Err(StoreError::InvalidCredentials);
            }
            Err(err) => return Err(err),
        };

        if deadline.run(self.hasher.verify(password, &stored_hash)).await?? {
            tracing::debug!("Verification succeeded");
            Ok(Verified)
        } else {
            tracing::debug!("Verification failed");
            Err(StoreError::InvalidCredentials)
        }
    }

    /// Fetch the stored hash for a username
    ///
    /// # Errors
    /// * `InvalidIdentifier` - Username fails the syntax rule
    /// * `NotFound` - No such user
    /// * `Server` - Database failure or deadline
    pub(crate) async fn lookup_hash(
        &self,
        deadline: Deadline,
        username: &str,
    ) -> Result<String, StoreError> {
        if !is_valid_username(username) {
            return Err(StoreError::InvalidIdentifier);
        }

        deadline
            .run(self.db.password_hash(username))
            .await??
            .ok_or(StoreError::NotFound)
    }

    /// Spend one bcrypt comparison so unknown users cost about as much as
    /// wrong passwords. Failures here are irrelevant to the verdict.
    async fn burn_decoy_comparison(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await;

        match decoy {
            Ok(hash) => {
                let _ = self.hasher.verify(password, hash).await;
            }
            Err(e) => tracing::warn!("Failed to prepare decoy hash: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::Duration;

    async fn store() -> CredentialStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        CredentialStore::with_hasher(db, PasswordHasher::with_cost(4))
    }

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_register_short_username() {
        let store = store().await;
        assert_matches!(
            store.register(deadline(), "ab", "longenoughpassword").await,
            Err(StoreError::InvalidIdentifier)
        );
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let store = store().await;
        assert_matches!(
            store.register(deadline(), "alice", "short").await,
            Err(StoreError::InvalidSecret)
        );
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let store = store().await;
        assert_matches!(store.register(deadline(), "alice", "longenoughpw").await, Ok(Created));
        assert_matches!(
            store.register(deadline(), "alice", "anotherpw123").await,
            Err(StoreError::AlreadyExists)
        );
    }

    #[tokio::test]
    async fn test_stored_hash_is_not_the_password() {
        let store = store().await;
        store.register(deadline(), "alice", "longenoughpw").await.unwrap();
        let hash = store.lookup_hash(deadline(), "alice").await.unwrap();
        assert_ne!(hash, "longenoughpw");
        assert!(hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_lookup_hash_outcomes() {
        let store = store().await;
        assert_matches!(
            store.lookup_hash(deadline(), "nosuchuser").await,
            Err(StoreError::NotFound)
        );
        assert_matches!(
            store.lookup_hash(deadline(), "no such user").await,
            Err(StoreError::InvalidIdentifier)
        );
    }

    #[tokio::test]
    async fn test_verify_outcomes() {
        let store = store().await;
        store.register(deadline(), "alice", "longenoughpw").await.unwrap();

        assert_matches!(store.verify(deadline(), "alice", "longenoughpw").await, Ok(Verified));
        assert_matches!(
            store.verify(deadline(), "alice", "wrongpassword").await,
            Err(StoreError::InvalidCredentials)
        );
        assert_matches!(
            store.verify(deadline(), "nosuchuser", "anything").await,
            Err(StoreError::InvalidCredentials)
        );
        assert_matches!(
            store.verify(deadline(), "a!", "anything").await,
            Err(StoreError::InvalidIdentifier)
        );
    }

    #[tokio::test]
    async fn test_verify_rejects_implausible_passwords_without_lookup() {
        let store = store().await;
        store.register(deadline(), "alice", "longenoughpw").await.unwrap();
        // A closed pool would turn any lookup into a server error
        store.database().close().await;

        assert_matches!(
            store.verify(deadline(), "alice", "   ").await,
            Err(StoreError::InvalidCredentials)
        );
        assert_matches!(
            store.verify(deadline(), "alice", &"x".repeat(257)).await,
            Err(StoreError::InvalidCredentials)
        );
        assert_matches!(
            store.verify(deadline(), "alice", "longenoughpw").await,
            Err(StoreError::Server(_))
        );
    }

    #[tokio::test]
    async fn test_invalid_usernames_never_reach_the_database() {
        let store = store().await;
        store.database().close().await;

        assert_matches!(
            store.register(deadline(), "x", "longenoughpw").await,
            Err(StoreError::InvalidIdentifier)
        );
        assert_matches!(
            store.verify(deadline(), "bad name", "longenoughpw").await,
            Err(StoreError::InvalidIdentifier)
        );
    }

    #[tokio::test]
    async fn test_expired_deadline_is_server_error() {
        let store = store().await;
        let expired = Deadline::at(tokio::time::Instant::now() - Duration::from_millis(1));
        assert_matches!(
            store.register(expired, "alice", "longenoughpw").await,
            Err(StoreError::Server(_))
        );
    }

    #[tokio::test]
    async fn test_long_password_tail_matters() {
        let store = store().await;
        let password = "a".repeat(100);
        store.register(deadline(), "alice", &password).await.unwrap();

        let mut changed = password.clone().into_bytes();
        changed[90] = b'b';
        let changed = String::from_utf8(changed).unwrap();

        assert_matches!(store.verify(deadline(), "alice", &password).await, Ok(Verified));
        assert_matches!(
            store.verify(deadline(), "alice", &changed).await,
            Err(StoreError::InvalidCredentials)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_has_one_winner() {
        // File-backed so the pool holds several connections and the INSERTs race
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("users.db").display());
        let db = Database::connect(&url).await.unwrap();
        db.migrate().await.unwrap();
        let store = CredentialStore::with_hasher(db, PasswordHasher::with_cost(4));

        let attempts: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .register(deadline(), "alice", &format!("longenoughpw{i}"))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut taken = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(Created) => created += 1,
                Err(StoreError::AlreadyExists) => taken += 1,
                Err(other) => panic!("unexpected outcome: {other:?}"),
            }
        }
        assert_eq!((created, taken), (1, 7));
    }
}
