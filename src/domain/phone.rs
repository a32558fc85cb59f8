//! PhoneNumber value object and E.164 normalizer.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// Compile once, use many times. The trailing bound is deliberately loose
// (1-10 digits after the leading national digit); the CLI driver layers a
// stricter exactly-10-digit gate on top of this for user-supplied overrides.
static E164_PLUS_ONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+1[1-9]\d{1,10}$").expect("static pattern"));
static E164_ONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[1-9]\d{1,10}$").expect("static pattern"));
static E164_BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9]\d{1,10}$").expect("static pattern"));

/// A phone number canonicalized to E.164 form (`+1` + national number).
///
/// Construction goes through [`PhoneNumber::normalize`], so every value of
/// this type holds exactly one canonical representation of its input.
///
/// # Example
///
/// ```
/// use sms_gateway::domain::PhoneNumber;
///
/// let phone = PhoneNumber::normalize("(360) 987-1234").unwrap();
/// assert_eq!(phone.as_str(), "+13609871234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Canonicalize arbitrary input into E.164 form.
    ///
    /// Spaces, hyphens, and parentheses are stripped, then three patterns are
    /// tried in order of specificity: already `+1`-prefixed, bare `1`-prefixed,
    /// and bare national number. First match wins. Input matching none of them
    /// yields `None` rather than a silently truncated value.
    pub fn normalize(raw: &str) -> Option<Self> {
        let digits: String = raw
            .chars()
            .filter(|&c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        if E164_PLUS_ONE.is_match(&digits) {
            // example: +13609871234, already canonical
            return Some(Self(digits));
        }
        if E164_ONE.is_match(&digits) {
            // example: 13609871234, add '+'
            return Some(Self(format!("+{}", digits)));
        }
        if E164_BARE.is_match(&digits) {
            // example: 3609871234, add '+1'
            return Some(Self(format!("+1{}", digits)));
        }
        None
    }

    /// Create a new PhoneNumber, normalizing the input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the input cannot be
    /// canonicalized.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        Self::normalize(&raw).ok_or(ValidationError::InvalidPhone(raw))
    }

    /// Get the canonical number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with normalization
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

// Display support
impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
