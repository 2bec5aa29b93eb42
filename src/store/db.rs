/**
 * Database Handle and Queries
 *
 * The Credential Store keeps one long-lived connection pool, created at
 * startup and passed explicitly into `CredentialStore`. PostgreSQL is the
 * production backend; SQLite is accepted as well (in-memory SQLite backs the
 * test suite). Both run the same migrations from `migrations/`.
 *
 * # Uniqueness
 *
 * `users.username` carries a UNIQUE constraint. Concurrent registrations of
 * the same name are adjudicated by the database: exactly one INSERT succeeds
 * and the rest fail with a unique violation, recognised by
 * `is_unique_violation`.
 *
 * # Deadlines
 *
 * Queries here are not bounded on their own. Callers wrap them in a
 * `Deadline` (see `CredentialStore`), and the pool's acquire timeout bounds
 * connection checkout.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};

/// Schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!();

const MAX_CONNECTIONS: u32 = 10;
const MIN_CONNECTIONS: u32 = 1;
const MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);
const IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection pool for the user table
#[derive(Debug, Clone)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Connect to the database named by `url`
    ///
    /// `sqlite:` URLs open a SQLite pool (created if missing); anything else
    /// is handed to the PostgreSQL driver. An in-memory SQLite database lives
    /// on a single connection that is never recycled, since each connection
    /// would otherwise see its own empty database.
    ///
    /// # Errors
    ///
    /// Returns the driver error if the URL is malformed or the first
    /// connection cannot be established within the acquire timeout.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        if url.starts_with("sqlite:") {
            let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
            let in_memory = url.contains(":memory:") || url.contains("mode=memory");

            let pool_options = if in_memory {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                SqlitePoolOptions::new()
                    .max_connections(MAX_CONNECTIONS)
                    .min_connections(MIN_CONNECTIONS)
                    .idle_timeout(IDLE_TIMEOUT)
                    .max_lifetime(MAX_LIFETIME)
            };

            let pool = pool_options
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .connect_with(options)
                .await?;
            return Ok(Self::Sqlite(pool));
        }

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .min_connections(MIN_CONNECTIONS)
            .max_lifetime(MAX_LIFETIME)
            .idle_timeout(IDLE_TIMEOUT)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(url)
            .await?;
        Ok(Self::Postgres(pool))
    }

    /// Run pending migrations
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        match self {
            Self::Postgres(pool) => MIGRATOR.run(pool).await,
            Self::Sqlite(pool) => MIGRATOR.run(pool).await,
        }
    }

    /// Insert a new user record
    ///
    /// # Arguments
    /// * `username` - Already validated username
    /// * `password_hash` - bcrypt hash of the user's password
    ///
    /// # Returns
    /// `Ok(())` on insert; a unique violation if the username is taken
    pub async fn insert_user(&self, username: &str, password_hash: &str) -> Result<(), sqlx::Error> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO users (username, password_hash)
                    VALUES ($1, $2)
                    "#,
                )
                .bind(username)
                .bind(password_hash)
                .execute(pool)
                .await?;
            }
            Self::Sqlite(pool) => {
                sqlx::query(
                    r#"
                    INSERT INTO users (username, password_hash)
                    VALUES (?1, ?2)
                    "#,
                )
                .bind(username)
                .bind(password_hash)
                .execute(pool)
                .await?;
            }
        }
        Ok(())
    }

    /// Get the stored password hash for a username
    ///
    /// # Returns
    /// The hash, or `None` if no such user exists
    pub async fn password_hash(&self, username: &str) -> Result<Option<String>, sqlx::Error> {
        let hash = match self {
            Self::Postgres(pool) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT password_hash FROM users WHERE username = $1",
                )
                .bind(username)
                .fetch_optional(pool)
                .await?
            }
            Self::Sqlite(pool) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT password_hash FROM users WHERE username = ?1",
                )
                .bind(username)
                .fetch_optional(pool)
                .await?
            }
        };
        Ok(hash)
    }

    /// Round-trip a trivial query to prove the database is reachable
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
            Self::Sqlite(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}

/// Whether `err` is the database reporting a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
