//! SMS Gateway - a blocking Rust client for a Twilio-compatible SMS REST API.
//!
//! This library wraps the provider's message operations (send, fetch, redact,
//! delete, history export) around a strict input-validation core: phone
//! numbers, credentials, and message identifiers are canonicalized or
//! rejected before anything touches the network, and raw provider text is
//! sanitized before it is stored.
//!
//! # Architecture
//!
//! - **domain**: validated value objects (phone numbers, sids, credentials)
//! - **text**: body sanitization, emoji catalog, random payload composition
//! - **models**: message/usage records and snapshot aggregates
//! - **error**: custom error types for precise error handling
//! - **config**: configuration management from environment variables
//! - **client**: blocking HTTP client for the provider REST API
//! - **provider**: the provider trait seam (REST client or test double)
//! - **services**: the gateway orchestrator
//! - **snapshot**: purge-then-write JSON export

// Re-export commonly used types
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod provider;
pub mod services;
pub mod snapshot;
pub mod text;

pub use client::TwilioRestClient;
pub use config::{Config, Environment};
pub use domain::{AccountSid, AuthToken, MessageSid, PhoneNumber, ValidationError};
pub use error::{ConfigError, SmsApiError};
pub use models::{MessageExtract, MessageRecord, UsageExtract, UsageRecord, MAX_BODY_LEN, REDACTED_BODY};
pub use provider::MessageProvider;
pub use services::SmsGateway;
pub use text::{compose_random_message, sanitize};
