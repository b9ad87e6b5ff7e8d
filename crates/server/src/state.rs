//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::clock::{Clock, SystemClock};
use crate::config::ServerConfig;
use crate::services::{AuthTokens, LeaderboardService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    tokens: AuthTokens,
    leaderboard: LeaderboardService,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state with the system clock.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        Self::with_clock(config, pool, Arc::new(SystemClock))
    }

    /// Create application state with an explicit clock (tests).
    #[must_use]
    pub fn with_clock(config: ServerConfig, pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        let tokens = AuthTokens::new(config.token_secret.clone());
        let leaderboard = LeaderboardService::new(config.leaderboard_cache_ttl_secs);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                leaderboard,
                clock,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the auth token service.
    #[must_use]
    pub fn tokens(&self) -> &AuthTokens {
        &self.inner.tokens
    }

    /// Get a reference to the cached leaderboard service.
    #[must_use]
    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.inner.leaderboard
    }

    /// Get a reference to the clock.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.inner.clock.as_ref()
    }
}
