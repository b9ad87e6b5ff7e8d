//! Leaderboard route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{LeaderboardPage, LeaderboardQuery};
use crate::state::AppState;

/// Raw leaderboard query parameters; validated into [`LeaderboardQuery`].
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    /// Optional geo scope supplied by the client (city name).
    pub city: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<u32>,
    /// Entries per page (default 20, max 100).
    pub page_size: Option<u32>,
}

/// Get a ranked page of users.
///
/// Reads go through a short-TTL cache, so a page may lag a check-in by a
/// few seconds but never shows uncommitted or partially updated counters.
#[instrument(skip(state, params))]
pub async fn leaderboard(
    State(state): State<AppState>,
    RequireAuth(_user_id): RequireAuth,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardPage>> {
    let query = LeaderboardQuery::new(params.city, params.page, params.page_size);
    let page = state.leaderboard().page(state.pool(), query).await?;
    Ok(Json(page))
}
