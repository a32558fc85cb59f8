//! AccountSid and AuthToken value objects.
//!
//! Credentials are never normalized: they are either exactly correct or
//! rejected at configuration-load time.

use super::errors::ValidationError;
use super::SID_LEN;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Auth token length in hexadecimal characters.
pub const TOKEN_LEN: usize = 32;

const ACCOUNT_PREFIX: &str = "AC";

/// A provider account identifier: exactly 34 characters, `AC` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountSid(String);

impl AccountSid {
    /// Create a new AccountSid, validating length and prefix.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` identifying which rule failed.
    pub fn new(sid: impl Into<String>) -> Result<Self, ValidationError> {
        let sid = sid.into();
        if sid.chars().count() != SID_LEN {
            return Err(ValidationError::WrongLength {
                field: "account_sid",
                expected: SID_LEN,
                actual: sid.chars().count(),
            });
        }
        if !sid.starts_with(ACCOUNT_PREFIX) {
            return Err(ValidationError::MissingPrefix {
                field: "account_sid",
                prefix: ACCOUNT_PREFIX,
            });
        }
        Ok(Self(sid))
    }

    /// Get the sid as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for AccountSid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AccountSid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AccountSid::new(s).map_err(serde::de::Error::custom)
    }
}

/// A provider auth token: exactly 32 hexadecimal characters.
///
/// Deliberately no `Display` impl; the token should not leak into log lines.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Create a new AuthToken, validating length and character set.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` identifying which rule failed.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.chars().count() != TOKEN_LEN {
            return Err(ValidationError::WrongLength {
                field: "auth_token",
                expected: TOKEN_LEN,
                actual: token.chars().count(),
            });
        }
        if !token.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::NotHexadecimal { field: "auth_token" });
        }
        Ok(Self(token))
    }

    /// Expose the raw token for request signing.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(****)")
    }
}
