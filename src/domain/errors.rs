//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided phone number could not be normalized to E.164.
    InvalidPhone(String),

    /// A fixed-length identifier has the wrong length.
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A prefixed identifier is missing its required prefix.
    MissingPrefix {
        field: &'static str,
        prefix: &'static str,
    },

    /// A token contains non-hexadecimal characters.
    NotHexadecimal { field: &'static str },

    /// A required provider field was absent.
    MissingField { field: &'static str },

    /// A timestamp string could not be parsed.
    InvalidTimestamp {
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPhone(raw) => write!(f, "invalid phone number: '{}'", raw),
            Self::WrongLength {
                field,
                expected,
                actual,
            } => write!(
                f,
                "{}: invalid length: {} chars (expected {})",
                field, actual, expected
            ),
            Self::MissingPrefix { field, prefix } => {
                write!(f, "{}: invalid format: missing '{}' prefix", field, prefix)
            }
            Self::NotHexadecimal { field } => write!(f, "{}: not hexadecimal", field),
            Self::MissingField { field } => write!(f, "{}: missing value", field),
            Self::InvalidTimestamp { field, value } => {
                write!(f, "{}: unparseable timestamp '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A single failing field inside a provider record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Record field name
    pub field: &'static str,
    /// What went wrong with it
    pub error: ValidationError,
}

/// Aggregate of every failing field in one record.
///
/// Record construction validates all fields before returning, so a single
/// error lists everything that must be fixed, not just the first problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValidationError {
    /// All failing fields, in declaration order
    pub fields: Vec<FieldError>,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid record ({} field(s)): ", self.fields.len())?;
        for (i, fe) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", fe.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for RecordValidationError {}
