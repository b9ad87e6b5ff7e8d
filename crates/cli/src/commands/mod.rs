//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod token;

/// Read the database URL from `SURVIVED_DATABASE_URL` with a fallback to
/// the generic `DATABASE_URL`.
pub(crate) fn database_url() -> Option<String> {
    std::env::var("SURVIVED_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}
