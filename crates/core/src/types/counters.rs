//! Derived streak counters.

use serde::{Deserialize, Serialize};

/// The four counters the streak engine derives from a user's check-in ledger.
///
/// These live on the user row and are only ever written by the check-in
/// transaction, so a read always sees a consistent quadruple.
///
/// ## Invariants
///
/// - `longest_streak >= current_streak`
/// - `survival_days == total_check_ins` (duplicates are rejected before
///   persistence, so every accepted record is a distinct day)
/// - all counters are non-negative and non-decreasing except
///   `current_streak`, which resets to 1 after a missed day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakCounters {
    /// Consecutive calendar days ending at the latest check-in, no gaps.
    pub current_streak: i32,
    /// Running maximum of `current_streak` ever observed.
    pub longest_streak: i32,
    /// Count of accepted check-in records.
    pub total_check_ins: i32,
    /// Distinct calendar days with at least one check-in.
    pub survival_days: i32,
}

impl StreakCounters {
    /// Counters for a user who has never checked in.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            total_check_ins: 0,
            survival_days: 0,
        }
    }

    /// Whether the counter quadruple satisfies the engine invariants.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.current_streak >= 0
            && self.longest_streak >= self.current_streak
            && self.total_check_ins >= 0
            && self.survival_days == self.total_check_ins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_consistent() {
        assert!(StreakCounters::zero().is_consistent());
    }

    #[test]
    fn test_longest_below_current_is_inconsistent() {
        let counters = StreakCounters {
            current_streak: 5,
            longest_streak: 3,
            total_check_ins: 5,
            survival_days: 5,
        };
        assert!(!counters.is_consistent());
    }

    #[test]
    fn test_survival_days_mismatch_is_inconsistent() {
        let counters = StreakCounters {
            current_streak: 1,
            longest_streak: 1,
            total_check_ins: 2,
            survival_days: 1,
        };
        assert!(!counters.is_consistent());
    }
}
