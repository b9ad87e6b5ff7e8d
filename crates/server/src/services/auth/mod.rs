//! Signed bearer tokens.
//!
//! The auth collaborator owns login (phone/OTP) and hands clients a token;
//! this engine only needs to recover an authenticated [`UserId`] from it.
//! The token is `base64url(user_id.expires_unix) . base64url(hmac_sha256)`,
//! replacing the unsigned id+timestamp scheme the original client shipped
//! with. Issuance lives here too so the CLI can mint development tokens.

pub mod error;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use survived_core::UserId;

pub use error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies HMAC-signed bearer tokens.
#[derive(Clone)]
pub struct AuthTokens {
    key: SecretString,
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl AuthTokens {
    /// Create a token service keyed by the configured secret.
    #[must_use]
    pub const fn new(key: SecretString) -> Self {
        Self { key }
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))
    }

    /// Issue a token for `user_id` valid for `ttl` from `now`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidKey` if the signing key is unusable.
    pub fn issue(
        &self,
        user_id: UserId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expires_at = (now + ttl).timestamp();
        let payload = format!("{}.{expires_at}", user_id.as_i32());

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify a token and return the authenticated user ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MalformedToken` for structural problems,
    /// `AuthError::InvalidSignature` on a mismatched MAC (constant-time
    /// comparison), and `AuthError::Expired` past the embedded expiry.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, AuthError> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(AuthError::MalformedToken)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::MalformedToken)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::MalformedToken)?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        let payload = std::str::from_utf8(&payload).map_err(|_| AuthError::MalformedToken)?;
        let (user_id, expires_at) = payload.split_once('.').ok_or(AuthError::MalformedToken)?;
        let user_id = user_id
            .parse::<i32>()
            .map_err(|_| AuthError::MalformedToken)?;
        let expires_at = expires_at
            .parse::<i64>()
            .map_err(|_| AuthError::MalformedToken)?;

        if now.timestamp() >= expires_at {
            return Err(AuthError::Expired);
        }

        Ok(UserId::new(user_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tokens() -> AuthTokens {
        AuthTokens::new(SecretString::from("kX9#mP2$vL5@qR8!wT3^nZ6&cF1*bH4j"))
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let tokens = tokens();
        let token = tokens.issue(UserId::new(42), Duration::hours(24), at(9)).unwrap();
        let user_id = tokens.verify(&token, at(10)).unwrap();
        assert_eq!(user_id, UserId::new(42));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = tokens();
        let token = tokens.issue(UserId::new(1), Duration::hours(1), at(9)).unwrap();
        assert_eq!(tokens.verify(&token, at(11)), Err(AuthError::Expired));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let tokens = tokens();
        let token = tokens.issue(UserId::new(1), Duration::hours(1), at(9)).unwrap();

        // Swap the payload for a different user id, keep the signature
        let (_, signature) = token.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(b"999.9999999999");
        let forged = format!("{forged_payload}.{signature}");

        assert_eq!(
            tokens.verify(&forged, at(9)),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = tokens()
            .issue(UserId::new(7), Duration::hours(1), at(9))
            .unwrap();
        let other = AuthTokens::new(SecretString::from("zQ4!rW7@eT2#yU9$iO6^pA3&sD8*fG5h"));
        assert_eq!(other.verify(&token, at(9)), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = tokens();
        assert_eq!(
            tokens.verify("not-a-token", at(9)),
            Err(AuthError::MalformedToken)
        );
        assert_eq!(tokens.verify("", at(9)), Err(AuthError::MalformedToken));
        assert_eq!(
            tokens.verify("a.b.c.d", at(9)),
            Err(AuthError::MalformedToken)
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", tokens());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("kX9#"));
    }
}
