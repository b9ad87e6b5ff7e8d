//! Check-in ledger repository: the idempotency guard.
//!
//! `record_check_in` is the only write path for both the ledger and the
//! user counters, and it does everything in one transaction:
//!
//! 1. lock the user row (`FOR UPDATE`) - serializes same-user requests
//! 2. `INSERT ... ON CONFLICT DO NOTHING` into the ledger - exactly one
//!    concurrent caller inserts; losers detect the existing row and report
//!    a duplicate instead of an error
//! 3. advance the counters via [`streak::advance`], or [`streak::backfill`]
//!    for a grace-window date behind the latest check-in, and write them
//!    back
//!
//! If any step fails the transaction rolls back, so a ledger record never
//! exists without its counter update or vice versa. `statement_timeout`
//! and `lock_timeout` bound the transaction; a timeout surfaces as
//! [`RepositoryError::Unavailable`], never as a false duplicate.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::instrument;

use survived_core::{CheckInId, StreakCounters, UserId};

use super::RepositoryError;
use crate::models::{CheckInOutcome, CheckInRecord};
use crate::streak;

/// Counter columns read under the row lock.
#[derive(sqlx::FromRow)]
struct CounterRow {
    current_streak: i32,
    longest_streak: i32,
    total_check_ins: i32,
    survival_days: i32,
    last_check_in_date: Option<NaiveDate>,
}

impl CounterRow {
    const fn counters(&self) -> StreakCounters {
        StreakCounters {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            total_check_ins: self.total_check_ins,
            survival_days: self.survival_days,
        }
    }
}

/// Repository for the check-in ledger and counter updates.
pub struct CheckInRepository<'a> {
    pool: &'a PgPool,
    /// Upper bound for the transaction, in milliseconds.
    timeout_ms: u32,
}

impl<'a> CheckInRepository<'a> {
    /// Create a new check-in repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool, timeout_ms: u32) -> Self {
        Self { pool, timeout_ms }
    }

    /// Atomically reserve `date` for `user_id` and advance the counters.
    ///
    /// The caller must have validated `date` against the user's day
    /// boundary window beforehand.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Unavailable` on lock or statement timeout.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self), fields(user_id = %user_id, date = %date))]
    pub async fn record_check_in(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> Result<CheckInOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // SET LOCAL does not accept bind parameters; timeout_ms comes from
        // validated config, never from request input.
        let set_statement = format!("SET LOCAL statement_timeout = {}", self.timeout_ms);
        sqlx::query(&set_statement).execute(&mut *tx).await?;
        let set_lock = format!("SET LOCAL lock_timeout = {}", self.timeout_ms);
        sqlx::query(&set_lock).execute(&mut *tx).await?;

        // Lock the user row for the duration of the transaction. Concurrent
        // check-ins for the same user queue here; other users are unaffected.
        let prev = sqlx::query_as::<_, CounterRow>(
            r"
            SELECT current_streak, longest_streak, total_check_ins, survival_days,
                   last_check_in_date
            FROM users
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(prev) = prev else {
            return Err(RepositoryError::NotFound);
        };

        let record_id = CheckInId::generate();
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r"
            INSERT INTO check_in_records (id, user_id, check_in_date)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, check_in_date) DO NOTHING
            RETURNING created_at
            ",
        )
        .bind(record_id)
        .bind(user_id)
        .bind(date)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(created_at) = created_at else {
            // The day is already reserved. Nothing was written; report the
            // duplicate with the counters read under the lock.
            tx.rollback().await?;
            tracing::debug!("duplicate check-in detected");
            return Ok(CheckInOutcome::AlreadyCheckedIn {
                counters: prev.counters(),
            });
        };

        // The grace window admits "yesterday", so a new ledger row can land
        // behind the latest check-in. Such a backfill counts toward the
        // totals but must not rewind the streak or last_check_in_date.
        let is_backfill = prev.last_check_in_date.is_some_and(|latest| date < latest);
        let (counters, latest_date) = if is_backfill {
            (streak::backfill(prev.counters()), prev.last_check_in_date)
        } else {
            (
                streak::advance(prev.counters(), prev.last_check_in_date, date),
                Some(date),
            )
        };

        sqlx::query(
            r"
            UPDATE users
            SET current_streak = $2,
                longest_streak = $3,
                total_check_ins = $4,
                survival_days = $5,
                last_check_in_date = $6,
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .bind(counters.current_streak)
        .bind(counters.longest_streak)
        .bind(counters.total_check_ins)
        .bind(counters.survival_days)
        .bind(latest_date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(current_streak = counters.current_streak, "check-in accepted");
        Ok(CheckInOutcome::Accepted {
            record: CheckInRecord {
                id: record_id,
                user_id,
                check_in_date: date,
                created_at,
            },
            counters,
        })
    }

}
