//! Domain value objects with constructor-time validation.
//!
//! Every type here guarantees its invariant at construction: a value that
//! exists is a value that passed validation.

mod credentials;
mod errors;
mod phone;
mod sid;

pub use credentials::{AccountSid, AuthToken, TOKEN_LEN};
pub use errors::{FieldError, RecordValidationError, ValidationError};
pub use phone::PhoneNumber;
pub use sid::MessageSid;

/// Provider sid length (both account and message identifiers).
pub const SID_LEN: usize = 34;
