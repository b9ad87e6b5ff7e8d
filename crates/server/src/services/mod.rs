//! Business services for the check-in engine.

pub mod auth;
pub mod leaderboard;

pub use auth::AuthTokens;
pub use leaderboard::LeaderboardService;
