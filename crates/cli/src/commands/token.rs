//! Development token minting command.
//!
//! Mints the same signed bearer tokens the server verifies, so a seeded
//! user can be exercised with curl without standing up the real auth
//! collaborator.

use chrono::{Duration, Utc};
use secrecy::SecretString;
use thiserror::Error;

use survived_core::UserId;
use survived_server::services::auth::{AuthError, AuthTokens};

/// Errors that can occur while minting a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("SURVIVED_TOKEN_SECRET must be set")]
    MissingEnvVar,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Mint a signed bearer token for `user_id`, valid for `ttl_days`.
///
/// # Errors
///
/// Returns an error if the token secret is missing or unusable.
#[allow(clippy::print_stdout)]
pub fn run(user_id: i32, ttl_days: i64) -> Result<(), TokenError> {
    dotenvy::dotenv().ok();

    let secret = std::env::var("SURVIVED_TOKEN_SECRET")
        .map(SecretString::from)
        .map_err(|_| TokenError::MissingEnvVar)?;

    let tokens = AuthTokens::new(secret);
    let token = tokens.issue(UserId::new(user_id), Duration::days(ttl_days), Utc::now())?;

    tracing::info!(user_id, ttl_days, "minted development token");
    println!("{token}");
    Ok(())
}
