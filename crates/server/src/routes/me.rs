//! Current-user streak route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use survived_core::StreakCounters;

use crate::clock::local_today;
use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// The caller's counters plus whether today is already reserved.
#[derive(Debug, Serialize)]
pub struct MyStreakResponse {
    #[serde(flatten)]
    pub counters: StreakCounters,
    pub checked_in_today: bool,
}

/// Get the caller's streak counters.
///
/// `checked_in_today` is derived from `last_check_in_date`, which the
/// check-in transaction keeps equal to the latest ledger date.
#[instrument(skip(state), fields(user_id = %user_id))]
pub async fn streak(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<MyStreakResponse>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;

    let today = local_today(state.clock().now(), user.utc_offset_minutes);

    Ok(Json(MyStreakResponse {
        counters: user.counters,
        checked_in_today: user.last_check_in_date == Some(today),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_response_flattens_counters() {
        let response = MyStreakResponse {
            counters: StreakCounters {
                current_streak: 3,
                longest_streak: 5,
                total_check_ins: 9,
                survival_days: 9,
            },
            checked_in_today: true,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["current_streak"], 3);
        assert_eq!(json["longest_streak"], 5);
        assert_eq!(json["checked_in_today"], true);
    }
}
