//! Leaderboard domain types.

use serde::Serialize;

use survived_core::UserId;

/// One ranked leaderboard row.
///
/// `nickname` and `avatar_emoji` are materialized display snapshots copied
/// from the user row at read time; they may lag live profile edits.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub nickname: String,
    pub avatar_emoji: String,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub survival_days: i32,
    /// 1-based global position within the scope.
    pub rank: i64,
}

/// A page of leaderboard entries.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardEntry>,
    pub page: u32,
    pub page_size: u32,
}

/// Validated leaderboard read parameters.
///
/// Construction clamps the raw query values so the cache key space and the
/// SQL OFFSET stay bounded. Also serves as the cache key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct LeaderboardQuery {
    /// Optional geo scope (city), pure read-side filter.
    pub city: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Entries per page, 1..=MAX_PAGE_SIZE.
    pub page_size: u32,
}

impl LeaderboardQuery {
    /// Largest allowed page size.
    pub const MAX_PAGE_SIZE: u32 = 100;
    /// Page size when the client does not specify one.
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    /// Build a validated query from raw client parameters.
    #[must_use]
    pub fn new(city: Option<String>, page: Option<u32>, page_size: Option<u32>) -> Self {
        let city = city.filter(|c| !c.trim().is_empty());
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE);
        Self {
            city,
            page,
            page_size,
        }
    }

    /// SQL OFFSET for this page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    /// SQL LIMIT for this page.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.page_size as i64
    }
}
