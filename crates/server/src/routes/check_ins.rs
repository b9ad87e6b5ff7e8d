//! Check-in route handler.

use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use survived_core::StreakCounters;

use crate::clock::{local_today, validate_check_in_date};
use crate::db::{CheckInRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Check-in request body. The date is optional and defaults to the user's
/// "today"; clients send an explicit date only when retrying a request
/// composed just before the day boundary.
#[derive(Debug, Default, Deserialize)]
pub struct CheckInRequest {
    pub date: Option<NaiveDate>,
}

/// Check-in response. `accepted` is `false` for a same-day duplicate; the
/// counters reflect current state either way.
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub accepted: bool,
    #[serde(flatten)]
    pub counters: StreakCounters,
}

/// Check in for today (or yesterday, within the grace window).
///
/// At most one check-in per user per calendar day is accepted; duplicates
/// return `accepted: false` with unchanged counters.
#[instrument(skip(state, body), fields(user_id = %user_id))]
pub async fn check_in(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    body: Option<Json<CheckInRequest>>,
) -> Result<Json<CheckInResponse>> {
    let Json(body) = body.unwrap_or_default();

    let user = UserRepository::new(state.pool())
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;

    let today = local_today(state.clock().now(), user.utc_offset_minutes);
    let date = validate_check_in_date(today, body.date.unwrap_or(today))?;

    let outcome = CheckInRepository::new(state.pool(), state.config().check_in_timeout_ms)
        .record_check_in(user_id, date)
        .await?;

    if outcome.accepted() {
        tracing::info!(date = %date, "check-in accepted");
    }

    Ok(Json(CheckInResponse {
        accepted: outcome.accepted(),
        counters: outcome.counters(),
    }))
}
