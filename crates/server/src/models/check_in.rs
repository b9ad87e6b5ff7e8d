//! Check-in ledger domain types.

use chrono::{DateTime, NaiveDate, Utc};

use survived_core::{CheckInId, StreakCounters, UserId};

/// One accepted check-in: a row in the insert-only ledger.
#[derive(Debug, Clone)]
pub struct CheckInRecord {
    /// Opaque record ID.
    pub id: CheckInId,
    /// User this record belongs to.
    pub user_id: UserId,
    /// Calendar day the check-in counts toward (user's day boundary).
    pub check_in_date: NaiveDate,
    /// Wall-clock acceptance time, informational only.
    pub created_at: DateTime<Utc>,
}

/// Result of attempting to reserve a calendar day for a user.
///
/// Both arms carry the counters as of the end of the transaction, so the
/// caller can always report current state.
#[derive(Debug, Clone)]
pub enum CheckInOutcome {
    /// The day was free; the record was persisted and counters advanced.
    Accepted {
        record: CheckInRecord,
        counters: StreakCounters,
    },
    /// A record for this day already exists; nothing changed.
    AlreadyCheckedIn { counters: StreakCounters },
}

impl CheckInOutcome {
    /// Whether the check-in was newly accepted.
    #[must_use]
    pub const fn accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The counters after the attempt (unchanged for duplicates).
    #[must_use]
    pub const fn counters(&self) -> StreakCounters {
        match self {
            Self::Accepted { counters, .. } | Self::AlreadyCheckedIn { counters } => *counters,
        }
    }
}
