//! SMS gateway orchestrator.
//!
//! Composes the validation core with the provider collaborator to implement
//! the send / fetch / redact / delete / extract operations. Every operation
//! validates its inputs locally before any network call, contains provider
//! failures at its own boundary, and surfaces them as `None`/`false` so a
//! failed step never crashes the calling sequence.

use crate::config::Config;
use crate::domain::{MessageSid, PhoneNumber};
use crate::models::{MessageExtract, MessageRecord, UsageExtract, UsageRecord, MAX_BODY_LEN, REDACTED_BODY};
use crate::provider::MessageProvider;
use crate::snapshot::write_snapshot;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Upper bound on one history extraction.
const HISTORY_PAGE_SIZE: usize = 100;

/// Orchestrator over a single provider account.
///
/// Holds the immutable validated configuration and a provider handle; no
/// other state is shared between operations.
pub struct SmsGateway {
    config: Config,
    provider: Arc<dyn MessageProvider>,
}

impl SmsGateway {
    /// Create a new gateway from validated configuration and a provider.
    pub fn new(config: &Config, provider: Arc<dyn MessageProvider>) -> Self {
        Self {
            config: config.clone(),
            provider,
        }
    }

    /// Verify a destination number through the provider lookup service.
    pub fn verify_phone_number(&self, number: &PhoneNumber) -> bool {
        match self.provider.lookup_phone_number(number) {
            Ok(lookup) if lookup.valid => {
                let carrier = lookup
                    .line_type_intelligence
                    .and_then(|info| info.carrier_name)
                    .unwrap_or_else(|| "unknown".to_string());
                info!("valid: '{}' carrier: {}", number, carrier);
                true
            }
            Ok(_) => {
                error!("invalid number: '{}'", number);
                false
            }
            Err(e) => {
                error!("lookup failed for '{}': {}", number, e);
                false
            }
        }
    }

    /// Send a text message, returning the provider-assigned sid.
    ///
    /// The destination is verified through the provider lookup first; on
    /// verification failure nothing is sent. Bodies at or over the provider
    /// limit are truncated with a logged warning.
    pub fn send_text(&self, to: &PhoneNumber, payload: &str) -> Option<MessageSid> {
        let payload: String = if payload.chars().count() >= MAX_BODY_LEN {
            warn!("message truncated to ({}) chars", MAX_BODY_LEN);
            payload.chars().take(MAX_BODY_LEN).collect()
        } else {
            payload.to_string()
        };

        if !self.verify_phone_number(to) {
            return None;
        }

        match self
            .provider
            .create_message(to, &self.config.from_number, &payload)
        {
            Ok(message) => match MessageSid::new(message.sid.clone()) {
                Ok(sid) => {
                    info!("sid: '{}' status: '{}'", sid, message.status);
                    Some(sid)
                }
                Err(e) => {
                    error!("provider returned malformed sid: {}", e);
                    None
                }
            },
            Err(e) => {
                error!("failed to send message '{}': {}", payload, e);
                None
            }
        }
    }

    /// Fetch one message, parse it, and save it as a single-record snapshot.
    ///
    /// Malformed sids are rejected locally; no network call is made for them.
    pub fn fetch_and_save(&self, sid: &str, filename: &str) -> Option<MessageRecord> {
        let sid = self.valid_sid(sid)?;

        match self.provider.fetch_message(&sid) {
            Ok(payload) => match MessageRecord::from_payload(&payload) {
                Ok(record) => {
                    let extract = MessageExtract::new(vec![record.clone()]);
                    self.save_snapshot(filename, &extract);
                    info!("message extracted: sid='{}'", sid);
                    Some(record)
                }
                Err(e) => {
                    error!("unparseable message sid='{}': {}", sid, e);
                    None
                }
            },
            Err(e) => {
                error!("failed to fetch message sid='{}': {}", sid, e);
                None
            }
        }
    }

    /// Redact a message body on the provider side.
    ///
    /// Succeeds only when the provider's returned body equals the redaction
    /// sentinel; a 2xx response alone is not enough.
    pub fn redact(&self, sid: &str) -> bool {
        let Some(sid) = self.valid_sid(sid) else {
            return false;
        };

        match self.provider.update_message_body(&sid, REDACTED_BODY) {
            Ok(message) => {
                if message.body == REDACTED_BODY {
                    info!("message body redacted: sid='{}'", sid);
                    true
                } else {
                    error!("failed redaction sid='{}'", sid);
                    false
                }
            }
            Err(e) => {
                error!("failed to redact message sid='{}': {}", sid, e);
                false
            }
        }
    }

    /// Remove a message from the account entirely.
    pub fn delete(&self, sid: &str) -> bool {
        let Some(sid) = self.valid_sid(sid) else {
            return false;
        };

        match self.provider.delete_message(&sid) {
            Ok(deleted) => {
                if deleted {
                    info!("message deleted: sid='{}'", sid);
                }
                deleted
            }
            Err(e) => {
                error!("failed to delete message sid='{}': {}", sid, e);
                false
            }
        }
    }

    /// Extract account message history into a snapshot file.
    ///
    /// Individual parse failures are skipped, not fatal to the batch.
    /// Returns the number of records extracted; `Some(0)` signals the
    /// distinguishable nothing-extracted condition (no snapshot written),
    /// `None` a provider failure.
    pub fn extract_history(&self, filename: &str) -> Option<usize> {
        match self.provider.list_messages(HISTORY_PAGE_SIZE) {
            Ok(payloads) => {
                let records: Vec<MessageRecord> = payloads
                    .iter()
                    .filter_map(|payload| match MessageRecord::from_payload(payload) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            warn!("skipping unparseable message: {}", e);
                            None
                        }
                    })
                    .collect();

                info!("extracted ({}) messages in account history", records.len());
                if records.is_empty() {
                    error!("no messages extracted");
                    return Some(0);
                }

                let count = records.len();
                self.save_snapshot(filename, &MessageExtract::new(records));
                Some(count)
            }
            Err(e) => {
                error!("failed to list message history: {}", e);
                None
            }
        }
    }

    /// Extract account usage records into a snapshot file.
    ///
    /// Returns the number of records extracted, or `None` on provider
    /// failure. An empty report still produces a snapshot.
    pub fn extract_usage(&self, filename: &str) -> Option<usize> {
        match self.provider.list_usage_records() {
            Ok(payloads) => {
                let records: Vec<UsageRecord> = payloads
                    .iter()
                    .filter_map(|payload| match UsageRecord::from_payload(payload) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            warn!("skipping unparseable usage record: {}", e);
                            None
                        }
                    })
                    .collect();

                let count = records.len();
                info!("extracted ({}) usage records", count);
                self.save_snapshot(filename, &UsageExtract::new(records));
                Some(count)
            }
            Err(e) => {
                error!("failed to list usage records: {}", e);
                None
            }
        }
    }

    /// Local sid gate: malformed identifiers never reach the provider.
    fn valid_sid(&self, raw: &str) -> Option<MessageSid> {
        match MessageSid::new(raw) {
            Ok(sid) => Some(sid),
            Err(e) => {
                error!("invalid message sid format: sid='{}' ({})", raw, e);
                None
            }
        }
    }

    fn save_snapshot<T: Serialize>(&self, filename: &str, data: &T) {
        let path = self.config.data_dir.join(filename);
        match write_snapshot(&path, data) {
            Ok(()) => info!("saved: '{}'", filename),
            Err(e) => error!("failed to save '{}': {}", filename, e),
        }
    }
}
