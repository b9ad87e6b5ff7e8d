//! Leaderboard read service with a bounded-staleness cache.
//!
//! Pages are cached in `moka` keyed by the validated query. The TTL is the
//! documented staleness window: a page may momentarily show pre-check-in
//! rank order, but every cached page was read from committed rows, so the
//! counter quadruples are always internally consistent.

use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::db::{LeaderboardRepository, RepositoryError};
use crate::models::{LeaderboardPage, LeaderboardQuery};

/// Cached leaderboard reader.
#[derive(Clone)]
pub struct LeaderboardService {
    cache: Cache<LeaderboardQuery, LeaderboardPage>,
}

impl LeaderboardService {
    /// Create the service with the given staleness window.
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        Self { cache }
    }

    /// Get one leaderboard page, from cache or the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the underlying query fails. Failed
    /// lookups are not cached.
    #[instrument(skip(self, pool, query), fields(city = ?query.city, page = query.page))]
    pub async fn page(
        &self,
        pool: &PgPool,
        query: LeaderboardQuery,
    ) -> Result<LeaderboardPage, RepositoryError> {
        if let Some(page) = self.cache.get(&query).await {
            debug!("leaderboard cache hit");
            return Ok(page);
        }

        let page = LeaderboardRepository::new(pool).fetch_page(&query).await?;
        self.cache.insert(query, page.clone()).await;
        Ok(page)
    }
}
