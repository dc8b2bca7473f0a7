//! Record store for user profiles.
//!
//! # Backends
//!
//! - [`PgUserStore`] - `PostgreSQL` table `profiles.user_profile`
//! - [`MemoryUserStore`] - process-local, for development and tests
//!
//! Both implement [`UserStore`]; handlers only ever see the trait.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and embedded into the
//! binary. They run at startup, before the server binds its listener.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use profile_directory_core::{ProfileData, UserId, UserProfile};

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

/// Errors that can occur during record store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested record was not found.
    #[error("not found")]
    NotFound,
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(err.to_string())
            }
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

/// Durable collection of user profiles keyed by a generated identifier.
///
/// Updates replace the whole record; there are no partial updates and no
/// uniqueness constraints besides the identifier.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every stored profile, in the store's native order.
    async fn list(&self) -> Result<Vec<UserProfile>, RepositoryError>;

    /// Insert a new profile, assigning its identifier.
    async fn insert(&self, data: ProfileData) -> Result<UserProfile, RepositoryError>;

    /// Replace every field of the profile at `id`.
    ///
    /// Returns `RepositoryError::NotFound` if no such profile exists.
    async fn replace(&self, id: UserId, data: ProfileData)
    -> Result<UserProfile, RepositoryError>;

    /// Remove the profile at `id`.
    ///
    /// Returns `RepositoryError::NotFound` if no such profile exists.
    async fn delete(&self, id: UserId) -> Result<(), RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the database is unreachable.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_errors_are_unavailable() {
        assert!(matches!(
            RepositoryError::from(sqlx::Error::PoolTimedOut),
            RepositoryError::Unavailable(_)
        ));
        assert!(matches!(
            RepositoryError::from(sqlx::Error::PoolClosed),
            RepositoryError::Unavailable(_)
        ));
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            RepositoryError::from(sqlx::Error::Io(io)),
            RepositoryError::Unavailable(_)
        ));
    }

    #[test]
    fn test_row_not_found_is_not_found() {
        assert!(matches!(
            RepositoryError::from(sqlx::Error::RowNotFound),
            RepositoryError::NotFound
        ));
    }

    #[test]
    fn test_other_errors_are_database() {
        assert!(matches!(
            RepositoryError::from(sqlx::Error::Protocol("bad frame".to_string())),
            RepositoryError::Database(_)
        ));
    }
}
