//! Data models for provider messages, usage reports, and snapshot exports.

pub mod extract;
pub mod message;
pub mod usage;

pub use extract::{MessageExtract, UsageExtract};
pub use message::{MessagePayload, MessageRecord, MAX_BODY_LEN, REDACTED_BODY};
pub use usage::{UsagePayload, UsageRecord};
