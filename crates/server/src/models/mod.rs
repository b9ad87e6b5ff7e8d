//! Domain types for the check-in engine.
//!
//! These types represent validated domain objects separate from database row types.

pub mod check_in;
pub mod leaderboard;
pub mod user;

pub use check_in::{CheckInOutcome, CheckInRecord};
pub use leaderboard::{LeaderboardEntry, LeaderboardPage, LeaderboardQuery};
pub use user::User;
