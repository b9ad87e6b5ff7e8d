//! HTTP route handlers for the check-in API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Check-ins (bearer token required)
//! POST /api/check-ins          - Check in for today (idempotent per day)
//! GET  /api/me/streak          - Current counters + checked-in-today flag
//!
//! # Leaderboard (bearer token required)
//! GET  /api/leaderboard        - Ranked users, optional ?city= scope,
//!                                ?page= and ?page_size= pagination
//! ```

pub mod check_ins;
pub mod leaderboard;
pub mod me;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/check-ins", post(check_ins::check_in))
        .route("/me/streak", get(me::streak))
        .route("/leaderboard", get(leaderboard::leaderboard))
}
