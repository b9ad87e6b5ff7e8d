//! Clock and calendar-day boundary.
//!
//! "Today" for a user is the wall-clock instant shifted by the user's
//! configured UTC offset, truncated to a date. The engine treats the
//! offset as opaque collaborator input; it does not do timezone math
//! beyond this single boundary.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use thiserror::Error;

/// Source of the current instant. Swapped for a fixed clock in tests.
pub trait Clock: Send + Sync {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Requested check-in date is outside the accepted window.
///
/// Not retryable; the caller must re-derive "today".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidDateError {
    /// Date is after the user's current calendar day.
    #[error("check-in date {requested} is in the future (today is {today})")]
    InFuture {
        requested: NaiveDate,
        today: NaiveDate,
    },
    /// Date is more than one day before the user's current calendar day.
    #[error("check-in date {requested} is stale (today is {today})")]
    Stale {
        requested: NaiveDate,
        today: NaiveDate,
    },
}

/// The calendar day at `now` for a user with the given day boundary.
#[must_use]
pub fn local_today(now: DateTime<Utc>, utc_offset_minutes: i32) -> NaiveDate {
    (now + TimeDelta::minutes(i64::from(utc_offset_minutes))).date_naive()
}

/// Validate a requested check-in date against the user's "today".
///
/// Today and yesterday are accepted; yesterday covers requests composed just
/// before the day boundary and delivered just after it. Anything in the
/// future or staler than one day is rejected.
///
/// # Errors
///
/// Returns [`InvalidDateError`] when the date falls outside the window.
pub fn validate_check_in_date(
    today: NaiveDate,
    requested: NaiveDate,
) -> Result<NaiveDate, InvalidDateError> {
    let offset_days = today.signed_duration_since(requested).num_days();
    if offset_days < 0 {
        return Err(InvalidDateError::InFuture { requested, today });
    }
    if offset_days > 1 {
        return Err(InvalidDateError::Stale { requested, today });
    }
    Ok(requested)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_today_utc() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 23, 30, 0).unwrap();
        assert_eq!(local_today(now, 0), date(2026, 3, 2));
    }

    #[test]
    fn test_local_today_east_of_utc_rolls_forward() {
        // 23:30 UTC is already the next day in UTC+8
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 23, 30, 0).unwrap();
        assert_eq!(local_today(now, 480), date(2026, 3, 3));
    }

    #[test]
    fn test_local_today_west_of_utc_rolls_back() {
        // 01:00 UTC is still the previous day in UTC-5
        let now = Utc.with_ymd_and_hms(2026, 3, 3, 1, 0, 0).unwrap();
        assert_eq!(local_today(now, -300), date(2026, 3, 2));
    }

    #[test]
    fn test_validate_today_accepted() {
        let today = date(2026, 3, 2);
        assert_eq!(validate_check_in_date(today, today), Ok(today));
    }

    #[test]
    fn test_validate_yesterday_accepted() {
        let today = date(2026, 3, 2);
        let yesterday = date(2026, 3, 1);
        assert_eq!(validate_check_in_date(today, yesterday), Ok(yesterday));
    }

    #[test]
    fn test_validate_future_rejected() {
        let today = date(2026, 3, 2);
        let tomorrow = date(2026, 3, 3);
        assert!(matches!(
            validate_check_in_date(today, tomorrow),
            Err(InvalidDateError::InFuture { .. })
        ));
    }

    #[test]
    fn test_validate_two_days_old_rejected() {
        let today = date(2026, 3, 2);
        let stale = date(2026, 2, 28);
        assert!(matches!(
            validate_check_in_date(today, stale),
            Err(InvalidDateError::Stale { .. })
        ));
    }

    #[test]
    fn test_system_clock_is_roughly_now() {
        let before = Utc::now();
        let now = SystemClock.now();
        let after = Utc::now();
        assert!(now >= before && now <= after);
    }
}
