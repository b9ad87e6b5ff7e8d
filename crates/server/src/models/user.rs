//! User domain types.

use chrono::{DateTime, NaiveDate, Utc};

use survived_core::{Phone, StreakCounters, UserId};

/// A user profile with its streak counters (domain type).
///
/// The profile fields are owned by the auth/profile collaborator; the
/// engine only mutates `counters` and `last_check_in_date`, always inside
/// the check-in transaction.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login identity (collaborator-owned).
    pub phone: Phone,
    /// Display name snapshot.
    pub nickname: String,
    /// Display avatar snapshot.
    pub avatar_emoji: String,
    /// Geo collaborator scope value, if set.
    pub city: Option<String>,
    /// Configured calendar-day boundary, minutes east of UTC.
    pub utc_offset_minutes: i32,
    /// Engine-derived counters.
    pub counters: StreakCounters,
    /// Latest accepted check-in date, if any.
    pub last_check_in_date: Option<NaiveDate>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
