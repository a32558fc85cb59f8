//! MessageSid value object.

use super::errors::ValidationError;
use super::SID_LEN;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const MESSAGE_PREFIX: &str = "SM";

/// A provider message identifier: exactly 34 characters, `SM` prefix.
///
/// Construction is the local gate that rejects malformed identifiers before
/// any network call is attempted.
///
/// # Example
///
/// ```
/// use sms_gateway::domain::MessageSid;
///
/// let sid = MessageSid::new("SM0123456789abcdef0123456789abcdef").unwrap();
/// assert_eq!(sid.as_str().len(), 34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageSid(String);

impl MessageSid {
    /// Create a new MessageSid, validating length and prefix.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` identifying which rule failed.
    pub fn new(sid: impl Into<String>) -> Result<Self, ValidationError> {
        let sid = sid.into();
        if sid.chars().count() != SID_LEN {
            return Err(ValidationError::WrongLength {
                field: "sid",
                expected: SID_LEN,
                actual: sid.chars().count(),
            });
        }
        if !sid.starts_with(MESSAGE_PREFIX) {
            return Err(ValidationError::MissingPrefix {
                field: "sid",
                prefix: MESSAGE_PREFIX,
            });
        }
        Ok(Self(sid))
    }

    /// Get the sid as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for MessageSid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MessageSid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MessageSid::new(s).map_err(serde::de::Error::custom)
    }
}
