//! Streak calculator.
//!
//! Pure derivation of the four user counters from the previous counter
//! state, the previous latest check-in date, and a newly admitted date.
//! Runs inside the check-in transaction with the user row locked, so it
//! never sees stale input.

use chrono::NaiveDate;

use survived_core::StreakCounters;

/// Advance the counters for a newly admitted check-in on `new_date`.
///
/// The idempotency guard intercepts same-day duplicates and routes
/// backdated days to [`backfill`], so `new_date` is always strictly after
/// `previous_latest` when one exists:
///
/// - first-ever check-in: `current_streak = 1`
/// - exactly one day after the previous: `current_streak + 1`
/// - gap of two or more days: reset to 1
///
/// `longest_streak` is the running maximum; `total_check_ins` and
/// `survival_days` each grow by one (they are equal by construction since
/// duplicates never reach this function).
#[must_use]
pub fn advance(
    previous: StreakCounters,
    previous_latest: Option<NaiveDate>,
    new_date: NaiveDate,
) -> StreakCounters {
    let current_streak = match previous_latest {
        None => 1,
        Some(prev) => {
            let gap_days = new_date.signed_duration_since(prev).num_days();
            debug_assert!(
                gap_days >= 1,
                "same-day or out-of-order check-in must be intercepted by the idempotency guard"
            );
            if gap_days == 1 {
                previous.current_streak + 1
            } else {
                1
            }
        }
    };

    StreakCounters {
        current_streak,
        longest_streak: previous.longest_streak.max(current_streak),
        total_check_ins: previous.total_check_ins + 1,
        survival_days: previous.survival_days + 1,
    }
}

/// Advance the counters for a backfilled check-in on a day strictly before
/// the user's latest one.
///
/// The boundary grace window lets a client submit "yesterday" after the
/// user has already checked in today. The backfilled day still counts as
/// survived, so `total_check_ins` and `survival_days` grow, but the streak
/// tracks the run ending at the latest check-in and does not move.
#[must_use]
pub const fn backfill(previous: StreakCounters) -> StreakCounters {
    StreakCounters {
        current_streak: previous.current_streak,
        longest_streak: previous.longest_streak,
        total_check_ins: previous.total_check_ins + 1,
        survival_days: previous.survival_days + 1,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_ever_check_in() {
        let counters = advance(StreakCounters::zero(), None, date(2026, 3, 2));
        assert_eq!(counters.current_streak, 1);
        assert_eq!(counters.longest_streak, 1);
        assert_eq!(counters.total_check_ins, 1);
        assert_eq!(counters.survival_days, 1);
    }

    #[test]
    fn test_consecutive_days_grow_streak() {
        // n consecutive days with no gap: current == longest == n
        let start = date(2026, 3, 2);
        let mut counters = StreakCounters::zero();
        let mut latest = None;
        for n in 0..10 {
            let day = start + chrono::TimeDelta::days(n);
            counters = advance(counters, latest, day);
            latest = Some(day);

            let expected = i32::try_from(n).unwrap() + 1;
            assert_eq!(counters.current_streak, expected);
            assert_eq!(counters.longest_streak, expected);
            assert_eq!(counters.total_check_ins, expected);
            assert!(counters.is_consistent());
        }
    }

    #[test]
    fn test_gap_resets_current_but_keeps_longest() {
        let counters = StreakCounters {
            current_streak: 5,
            longest_streak: 5,
            total_check_ins: 5,
            survival_days: 5,
        };
        // Two-day gap
        let counters = advance(counters, Some(date(2026, 3, 6)), date(2026, 3, 8));
        assert_eq!(counters.current_streak, 1);
        assert_eq!(counters.longest_streak, 5);
        assert_eq!(counters.total_check_ins, 6);
        assert_eq!(counters.survival_days, 6);
        assert!(counters.is_consistent());
    }

    #[test]
    fn test_long_gap_resets_too() {
        let counters = StreakCounters {
            current_streak: 3,
            longest_streak: 7,
            total_check_ins: 12,
            survival_days: 12,
        };
        let counters = advance(counters, Some(date(2026, 1, 10)), date(2026, 3, 1));
        assert_eq!(counters.current_streak, 1);
        assert_eq!(counters.longest_streak, 7);
        assert_eq!(counters.total_check_ins, 13);
    }

    #[test]
    fn test_new_run_overtakes_longest() {
        let mut counters = StreakCounters {
            current_streak: 2,
            longest_streak: 2,
            total_check_ins: 2,
            survival_days: 2,
        };
        let mut latest = date(2026, 3, 3);
        // Three more consecutive days: current 3, 4, 5 with longest following
        for _ in 0..3 {
            let next = latest.succ_opt().unwrap();
            counters = advance(counters, Some(latest), next);
            latest = next;
        }
        assert_eq!(counters.current_streak, 5);
        assert_eq!(counters.longest_streak, 5);
    }

    #[test]
    fn test_mon_tue_wed_skip_thu_fri() {
        // Mon, Tue, Wed -> {3, 3, 3}; skip Thu; Fri -> {1, 3, 4}
        let monday = date(2026, 3, 2);
        let mut counters = StreakCounters::zero();
        let mut latest = None;
        for n in 0..3 {
            let day = monday + chrono::TimeDelta::days(n);
            counters = advance(counters, latest, day);
            latest = Some(day);
        }
        assert_eq!(counters.current_streak, 3);
        assert_eq!(counters.longest_streak, 3);
        assert_eq!(counters.total_check_ins, 3);

        let friday = monday + chrono::TimeDelta::days(4);
        let counters = advance(counters, latest, friday);
        assert_eq!(counters.current_streak, 1);
        assert_eq!(counters.longest_streak, 3);
        assert_eq!(counters.total_check_ins, 4);
        assert_eq!(counters.survival_days, 4);
    }

    #[test]
    fn test_backfill_counts_day_without_moving_streak() {
        // Checked in today already, then yesterday arrives late
        let counters = StreakCounters {
            current_streak: 1,
            longest_streak: 3,
            total_check_ins: 4,
            survival_days: 4,
        };
        let counters = backfill(counters);
        assert_eq!(counters.current_streak, 1);
        assert_eq!(counters.longest_streak, 3);
        assert_eq!(counters.total_check_ins, 5);
        assert_eq!(counters.survival_days, 5);
        assert!(counters.is_consistent());
    }

    #[test]
    fn test_counters_stay_equal() {
        let mut counters = StreakCounters::zero();
        let mut latest = None;
        let days = [
            date(2026, 3, 2),
            date(2026, 3, 3),
            date(2026, 3, 7),
            date(2026, 3, 8),
            date(2026, 4, 1),
        ];
        for day in days {
            counters = advance(counters, latest, day);
            latest = Some(day);
            assert_eq!(counters.total_check_ins, counters.survival_days);
        }
        assert_eq!(counters.total_check_ins, 5);
    }
}
