//! Provider abstraction.
//!
//! `MessageProvider` is the seam between the orchestrator and the network:
//! the orchestrator only ever talks to this trait, enabling different
//! implementations (REST client, test double). Identifier arguments are the
//! validated domain types, so a malformed sid or number cannot reach an
//! implementation at all.

use crate::client::{PhoneLookup, TwilioRestClient};
use crate::domain::{MessageSid, PhoneNumber};
use crate::error::SmsApiResult;
use crate::models::{MessagePayload, UsagePayload};

/// Remote SMS provider operations.
pub trait MessageProvider: Send + Sync {
    /// Submit a new outgoing message.
    fn create_message(
        &self,
        to: &PhoneNumber,
        from: &PhoneNumber,
        body: &str,
    ) -> SmsApiResult<MessagePayload>;

    /// Fetch a single message by sid.
    fn fetch_message(&self, sid: &MessageSid) -> SmsApiResult<MessagePayload>;

    /// Overwrite a message body.
    fn update_message_body(&self, sid: &MessageSid, body: &str) -> SmsApiResult<MessagePayload>;

    /// Delete a message, returning the provider's success flag.
    fn delete_message(&self, sid: &MessageSid) -> SmsApiResult<bool>;

    /// List up to `page_size` messages from account history.
    fn list_messages(&self, page_size: usize) -> SmsApiResult<Vec<MessagePayload>>;

    /// Query carrier information about a phone number.
    fn lookup_phone_number(&self, number: &PhoneNumber) -> SmsApiResult<PhoneLookup>;

    /// List account usage records.
    fn list_usage_records(&self) -> SmsApiResult<Vec<UsagePayload>>;
}

impl MessageProvider for TwilioRestClient {
    fn create_message(
        &self,
        to: &PhoneNumber,
        from: &PhoneNumber,
        body: &str,
    ) -> SmsApiResult<MessagePayload> {
        TwilioRestClient::create_message(self, to, from, body)
    }

    fn fetch_message(&self, sid: &MessageSid) -> SmsApiResult<MessagePayload> {
        TwilioRestClient::fetch_message(self, sid)
    }

    fn update_message_body(&self, sid: &MessageSid, body: &str) -> SmsApiResult<MessagePayload> {
        TwilioRestClient::update_message_body(self, sid, body)
    }

    fn delete_message(&self, sid: &MessageSid) -> SmsApiResult<bool> {
        TwilioRestClient::delete_message(self, sid)
    }

    fn list_messages(&self, page_size: usize) -> SmsApiResult<Vec<MessagePayload>> {
        TwilioRestClient::list_messages(self, page_size)
    }

    fn lookup_phone_number(&self, number: &PhoneNumber) -> SmsApiResult<PhoneLookup> {
        TwilioRestClient::lookup_phone_number(self, number)
    }

    fn list_usage_records(&self) -> SmsApiResult<Vec<UsagePayload>> {
        TwilioRestClient::list_usage_records(self)
    }
}
