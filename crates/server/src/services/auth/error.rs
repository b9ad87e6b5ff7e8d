//! Authentication error types.

use thiserror::Error;

/// Errors from token verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization: Bearer` header was supplied.
    #[error("missing bearer token")]
    MissingToken,

    /// Token structure could not be parsed.
    #[error("malformed token")]
    MalformedToken,

    /// Token signature does not match.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Token is past its expiry.
    #[error("token expired")]
    Expired,

    /// The signing key could not be used.
    #[error("invalid signing key: {0}")]
    InvalidKey(String),
}
