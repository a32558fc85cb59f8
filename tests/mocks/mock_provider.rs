use sms_gateway::client::PhoneLookup;
use sms_gateway::domain::{MessageSid, PhoneNumber};
use sms_gateway::error::{SmsApiError, SmsApiResult};
use sms_gateway::models::{MessagePayload, UsagePayload};
use sms_gateway::provider::MessageProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock message provider for testing.
///
/// Provides an in-memory implementation of MessageProvider that can be
/// configured with canned responses and tracks method calls so tests can
/// verify that locally-rejected input causes no provider traffic at all.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockProvider {
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    lookup_valid: Arc<Mutex<bool>>,
    create_response: Arc<Mutex<Option<MessagePayload>>>,
    fetch_response: Arc<Mutex<Option<MessagePayload>>>,
    update_response: Arc<Mutex<Option<MessagePayload>>>,
    list_response: Arc<Mutex<Vec<MessagePayload>>>,
    usage_response: Arc<Mutex<Vec<UsagePayload>>>,
    last_create_body: Arc<Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl MockProvider {
    /// Create a new empty MockProvider (lookups report invalid by default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Make phone-number lookups report valid.
    pub fn with_valid_lookup(self) -> Self {
        *self.lookup_valid.lock().unwrap() = true;
        self
    }

    /// Set the payload returned by create_message.
    pub fn with_create_response(self, payload: MessagePayload) -> Self {
        *self.create_response.lock().unwrap() = Some(payload);
        self
    }

    /// Set the payload returned by fetch_message.
    pub fn with_fetch_response(self, payload: MessagePayload) -> Self {
        *self.fetch_response.lock().unwrap() = Some(payload);
        self
    }

    /// Set the payload returned by update_message_body.
    pub fn with_update_response(self, payload: MessagePayload) -> Self {
        *self.update_response.lock().unwrap() = Some(payload);
        self
    }

    /// Set the payloads returned by list_messages.
    pub fn with_list_response(self, payloads: Vec<MessagePayload>) -> Self {
        *self.list_response.lock().unwrap() = payloads;
        self
    }

    /// Set the payloads returned by list_usage_records.
    pub fn with_usage_response(self, payloads: Vec<UsagePayload>) -> Self {
        *self.usage_response.lock().unwrap() = payloads;
        self
    }

    /// Get the number of times a method was called.
    pub fn call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total number of provider calls across all methods.
    pub fn total_calls(&self) -> usize {
        let counts = self.call_counts.lock().unwrap();
        counts.values().sum()
    }

    /// Body passed to the last create_message call, if any.
    pub fn last_create_body(&self) -> Option<String> {
        self.last_create_body.lock().unwrap().clone()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl MessageProvider for MockProvider {
    fn create_message(
        &self,
        _to: &PhoneNumber,
        _from: &PhoneNumber,
        body: &str,
    ) -> SmsApiResult<MessagePayload> {
        self.track_call("create_message");
        *self.last_create_body.lock().unwrap() = Some(body.to_string());

        self.create_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SmsApiError::HttpError("no create response configured".to_string()))
    }

    fn fetch_message(&self, sid: &MessageSid) -> SmsApiResult<MessagePayload> {
        self.track_call("fetch_message");

        self.fetch_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SmsApiError::NotFound(format!("Message {} not found", sid)))
    }

    fn update_message_body(&self, sid: &MessageSid, _body: &str) -> SmsApiResult<MessagePayload> {
        self.track_call("update_message_body");

        self.update_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SmsApiError::NotFound(format!("Message {} not found", sid)))
    }

    fn delete_message(&self, _sid: &MessageSid) -> SmsApiResult<bool> {
        self.track_call("delete_message");
        Ok(true)
    }

    fn list_messages(&self, _page_size: usize) -> SmsApiResult<Vec<MessagePayload>> {
        self.track_call("list_messages");
        Ok(self.list_response.lock().unwrap().clone())
    }

    fn lookup_phone_number(&self, number: &PhoneNumber) -> SmsApiResult<PhoneLookup> {
        self.track_call("lookup_phone_number");

        Ok(PhoneLookup {
            phone_number: number.as_str().to_string(),
            valid: *self.lookup_valid.lock().unwrap(),
            line_type_intelligence: None,
        })
    }

    fn list_usage_records(&self) -> SmsApiResult<Vec<UsagePayload>> {
        self.track_call("list_usage_records");
        Ok(self.usage_response.lock().unwrap().clone())
    }
}
