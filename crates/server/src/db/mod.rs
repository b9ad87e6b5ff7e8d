//! Database operations for the Survived `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Profiles plus the four engine-owned streak counters
//! - `check_in_records` - Insert-only ledger, unique on `(user_id, check_in_date)`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p survived-cli -- migrate
//! ```

pub mod check_ins;
pub mod leaderboard;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use check_ins::CheckInRepository;
pub use leaderboard::LeaderboardRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Store unreachable or transaction timed out; safe to retry.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate phone).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Whether the caller may retry the operation as-is.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

// Postgres SQLSTATE codes that mean "timed out or deadlocked, retry":
// 55P03 lock_not_available, 57014 query_canceled (statement_timeout),
// 40P01 deadlock_detected.
const RETRYABLE_SQLSTATES: &[&str] = &["55P03", "57014", "40P01"];

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable(e)
            }
            sqlx::Error::Database(db_err) => {
                let code = db_err.code();
                if code
                    .as_deref()
                    .is_some_and(|c| RETRYABLE_SQLSTATES.contains(&c))
                {
                    Self::Unavailable(e)
                } else {
                    Self::Database(e)
                }
            }
            _ => Self::Database(e),
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        let err = RepositoryError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Unavailable(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_row_not_found_maps_to_database() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_not_found_is_not_retryable() {
        assert!(!RepositoryError::NotFound.is_retryable());
    }
}
