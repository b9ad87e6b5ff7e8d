//! Leaderboard repository.
//!
//! Read-only ranked query over the user counters. Holds no locks; sees
//! only committed counter quadruples because the check-in transaction is
//! the sole writer.

use sqlx::PgPool;
use tracing::instrument;

use survived_core::UserId;

use super::RepositoryError;
use crate::models::{LeaderboardEntry, LeaderboardPage, LeaderboardQuery};

#[derive(sqlx::FromRow)]
struct LeaderboardRow {
    id: UserId,
    nickname: String,
    avatar_emoji: String,
    current_streak: i32,
    longest_streak: i32,
    survival_days: i32,
}

/// Repository for leaderboard reads.
pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    /// Create a new leaderboard repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of the ranked leaderboard.
    ///
    /// Ordering is a total order: streak, longest streak, survival days
    /// (all descending), then account creation time ascending (earlier
    /// accounts rank higher), then id ascending as the final tiebreak for
    /// equal timestamps. Rank is the 1-based global position within the
    /// scope.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, query), fields(city = ?query.city, page = query.page))]
    pub async fn fetch_page(
        &self,
        query: &LeaderboardQuery,
    ) -> Result<LeaderboardPage, RepositoryError> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r"
            SELECT id, nickname, avatar_emoji,
                   current_streak, longest_streak, survival_days
            FROM users
            WHERE ($1::TEXT IS NULL OR city = $1)
            ORDER BY current_streak DESC, longest_streak DESC, survival_days DESC,
                     created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(query.city.as_deref())
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(self.pool)
        .await?;

        let offset = query.offset();
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| LeaderboardEntry {
                user_id: row.id,
                nickname: row.nickname,
                avatar_emoji: row.avatar_emoji,
                current_streak: row.current_streak,
                longest_streak: row.longest_streak,
                survival_days: row.survival_days,
                rank: offset + i as i64 + 1,
            })
            .collect();

        Ok(LeaderboardPage {
            entries,
            page: query.page,
            page_size: query.page_size,
        })
    }
}
