//! Database seeding command for development and demos.
//!
//! Creates demo users and replays a back-dated check-in history through
//! the real check-in path, so the seeded counters are always consistent
//! with the ledger.

use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::PgPool;
use thiserror::Error;

use survived_core::{Phone, PhoneError};
use survived_server::db::{CheckInRepository, RepositoryError, UserRepository};

/// Transaction timeout for seed check-ins, in milliseconds.
const SEED_TIMEOUT_MS: u32 = 5000;

const NICKNAMES: &[&str] = &[
    "打工魂",
    "摸鱼大师",
    "卷王本王",
    "苟住别浪",
    "周报战神",
    "续命咖啡",
    "下班雷达",
    "工位钉子户",
    "Deadline Dancer",
    "Meeting Survivor",
];

const CITIES: &[&str] = &["北京", "上海", "深圳", "杭州", "成都", "广州"];

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("SURVIVED_DATABASE_URL or DATABASE_URL must be set")]
    MissingEnvVar,

    #[error("invalid SURVIVED_DEFAULT_UTC_OFFSET_MINUTES: {0}")]
    InvalidUtcOffset(String),

    #[error("generated phone is invalid: {0}")]
    Phone(#[from] PhoneError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Seed `users` demo users, each with up to `history_days` of back-dated
/// check-ins.
///
/// Random gaps are left in each history so the seeded leaderboard shows a
/// realistic spread of current and longest streaks.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any write fails.
pub async fn run(users: u32, history_days: u32) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url().ok_or(SeedError::MissingEnvVar)?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let utc_offset_minutes =
        parse_utc_offset(std::env::var("SURVIVED_DEFAULT_UTC_OFFSET_MINUTES").ok().as_deref())?;

    tracing::info!(users, history_days, utc_offset_minutes, "Seeding demo data");
    let mut rng = rand::rng();

    let user_repo = UserRepository::new(&pool);
    let check_ins = CheckInRepository::new(&pool, SEED_TIMEOUT_MS);
    let today = Utc::now().date_naive();

    for i in 0..users {
        let phone = Phone::parse(&format!("+8613800{:06}", 100_000 + i))?;

        // Re-running the seed should top up history, not fail on the
        // existing users.
        let user = match user_repo.get_by_phone(&phone).await? {
            Some(existing) => {
                tracing::debug!(user_id = %existing.id, "user already seeded");
                existing
            }
            None => {
                let nickname = NICKNAMES[i as usize % NICKNAMES.len()];
                let city = CITIES[rng.random_range(0..CITIES.len())];
                user_repo
                    .create(&phone, nickname, Some(city), utc_offset_minutes)
                    .await?
            }
        };

        let mut accepted = 0u32;
        for days_ago in (0..history_days).rev() {
            // Leave gaps so streaks reset; recent days are more reliable.
            let skip_chance = if days_ago < 3 { 0.05 } else { 0.25 };
            if rng.random_bool(skip_chance) {
                continue;
            }

            let date = today - Duration::days(i64::from(days_ago));
            let outcome = check_ins.record_check_in(user.id, date).await?;
            if outcome.accepted() {
                accepted += 1;
            }
        }

        tracing::info!(user_id = %user.id, check_ins = accepted, "seeded user");
    }

    tracing::info!("Seeding completed successfully");
    Ok(())
}

/// Parse the day-boundary offset for new users, minutes east of UTC.
///
/// Defaults to 480 (UTC+8). Half-hour zones exist but anything past
/// +/-18h is a typo.
fn parse_utc_offset(raw: Option<&str>) -> Result<i32, SeedError> {
    let Some(raw) = raw else {
        return Ok(480);
    };
    let offset = raw
        .parse::<i32>()
        .map_err(|e| SeedError::InvalidUtcOffset(format!("{raw:?}: {e}")))?;
    if offset.abs() > 18 * 60 {
        return Err(SeedError::InvalidUtcOffset(format!(
            "{offset} is outside +/-1080"
        )));
    }
    Ok(offset)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_defaults_when_unset() {
        assert_eq!(parse_utc_offset(None).unwrap(), 480);
    }

    #[test]
    fn test_offset_parses_and_bounds() {
        assert_eq!(parse_utc_offset(Some("-300")).unwrap(), -300);
        assert_eq!(parse_utc_offset(Some("330")).unwrap(), 330);
        assert!(parse_utc_offset(Some("100000")).is_err());
        assert!(parse_utc_offset(Some("eight")).is_err());
    }
}
