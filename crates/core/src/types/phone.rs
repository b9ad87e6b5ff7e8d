//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input string is too short.
    #[error("phone number must be at least {min} digits")]
    TooShort {
        /// Minimum allowed digit count.
        min: usize,
    },
    /// The input string is too long.
    #[error("phone number must be at most {max} digits")]
    TooLong {
        /// Maximum allowed digit count.
        max: usize,
    },
    /// The input contains a non-digit character.
    #[error("phone number contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A phone number in E.164-ish form.
///
/// The phone number is the login identity supplied by the auth collaborator;
/// this engine only stores and compares it. Validation is structural, not a
/// carrier lookup.
///
/// ## Constraints
///
/// - Optional leading `+`
/// - 5-15 digits (E.164 limit), no separators
///
/// ## Examples
///
/// ```
/// use survived_core::Phone;
///
/// assert!(Phone::parse("+8613800138000").is_ok());
/// assert!(Phone::parse("13800138000").is_ok());
///
/// assert!(Phone::parse("").is_err());            // empty
/// assert!(Phone::parse("138-0013-8000").is_err()); // separators
/// assert!(Phone::parse("123").is_err());         // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 5;
    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains non-digit characters
    /// (other than a leading `+`), or has an out-of-range digit count.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = s.strip_prefix('+').unwrap_or(s);

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacter(bad));
        }

        if digits.len() < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }

        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_phones() {
        assert!(Phone::parse("+8613800138000").is_ok());
        assert!(Phone::parse("13800138000").is_ok());
        assert!(Phone::parse("+14155550123").is_ok());
        assert!(Phone::parse("55501").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Phone::parse("123"),
            Err(PhoneError::TooShort { .. })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Phone::parse("1234567890123456"),
            Err(PhoneError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            Phone::parse("138-0013-8000"),
            Err(PhoneError::InvalidCharacter('-'))
        ));
        assert!(matches!(
            Phone::parse("13800abc000"),
            Err(PhoneError::InvalidCharacter('a'))
        ));
    }

    #[test]
    fn test_plus_only_in_prefix() {
        assert!(matches!(
            Phone::parse("138+0013800"),
            Err(PhoneError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn test_display_and_as_str() {
        let phone = Phone::parse("+8613800138000").unwrap();
        assert_eq!(phone.as_str(), "+8613800138000");
        assert_eq!(format!("{phone}"), "+8613800138000");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("13800138000").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"13800138000\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
