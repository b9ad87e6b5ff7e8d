//! User repository for database operations.
//!
//! Reads user rows and creates them on behalf of the profile collaborator
//! (the CLI seed command). Counter writes happen only in
//! [`CheckInRepository`](super::CheckInRepository).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use survived_core::{Phone, StreakCounters, UserId};

use super::RepositoryError;
use crate::models::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    phone: String,
    nickname: String,
    avatar_emoji: String,
    city: Option<String>,
    utc_offset_minutes: i32,
    survival_days: i32,
    total_check_ins: i32,
    current_streak: i32,
    longest_streak: i32,
    last_check_in_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let phone = Phone::parse(&row.phone).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            phone,
            nickname: row.nickname,
            avatar_emoji: row.avatar_emoji,
            city: row.city,
            utc_offset_minutes: row.utc_offset_minutes,
            counters: StreakCounters {
                current_streak: row.current_streak,
                longest_streak: row.longest_streak,
                total_check_ins: row.total_check_ins,
                survival_days: row.survival_days,
            },
            last_check_in_date: row.last_check_in_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored phone is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, phone, nickname, avatar_emoji, city, utc_offset_minutes,
                   survival_days, total_check_ins, current_streak, longest_streak,
                   last_check_in_date, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user by their phone number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored phone is invalid.
    pub async fn get_by_phone(&self, phone: &Phone) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, phone, nickname, avatar_emoji, city, utc_offset_minutes,
                   survival_days, total_check_ins, current_streak, longest_streak,
                   last_check_in_date, created_at, updated_at
            FROM users
            WHERE phone = $1
            ",
        )
        .bind(phone)
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Create a new user with zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the phone already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        phone: &Phone,
        nickname: &str,
        city: Option<&str>,
        utc_offset_minutes: i32,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (phone, nickname, city, utc_offset_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, phone, nickname, avatar_emoji, city, utc_offset_minutes,
                      survival_days, total_check_ins, current_streak, longest_streak,
                      last_check_in_date, created_at, updated_at
            ",
        )
        .bind(phone)
        .bind(nickname)
        .bind(city)
        .bind(utc_offset_minutes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("phone already exists".to_owned());
            }
            RepositoryError::from(e)
        })?;

        User::try_from(row)
    }
}
