//! HTTP client for the provider's SMS REST API.
//!
//! This module provides a blocking, synchronous HTTP client: one outstanding
//! request at a time, a bounded per-call timeout, and classified error
//! mapping. All requests authenticate with HTTP Basic using the validated
//! account credentials.

use crate::config::Config;
use crate::domain::{AccountSid, AuthToken, MessageSid, PhoneNumber};
use crate::error::{SmsApiError, SmsApiResult};
use crate::models::{MessagePayload, UsagePayload};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Response wrapper for the paged message-list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListMessagesResponse {
    /// The messages for this page, in provider order
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
}

/// Response wrapper for the account usage-report endpoint.
#[derive(Debug, Deserialize)]
pub struct UsageRecordsResponse {
    /// The usage records
    #[serde(default)]
    pub usage_records: Vec<serde_json::Value>,
}

/// Carrier metadata attached to a phone-number lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct LineTypeIntelligence {
    /// Carrier name, when the provider knows it
    #[serde(default)]
    pub carrier_name: Option<String>,
}

/// Result of a provider phone-number lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct PhoneLookup {
    /// The number that was looked up
    #[serde(default)]
    pub phone_number: String,

    /// Whether the provider considers the number valid
    #[serde(default)]
    pub valid: bool,

    /// Carrier metadata, when requested and available
    #[serde(default)]
    pub line_type_intelligence: Option<LineTypeIntelligence>,
}

/// Blocking HTTP client for a Twilio-shaped SMS REST API.
#[derive(Clone)]
pub struct TwilioRestClient {
    /// REST API base URL
    base_url: String,

    /// Phone-lookup base URL (separate host on the real provider)
    lookup_url: String,

    /// Account identifier, used in both auth and resource paths
    account_sid: AccountSid,

    /// Precomputed `Basic` authorization header value
    auth_header: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl TwilioRestClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            lookup_url: config.lookup_base_url.clone(),
            account_sid: config.account_sid.clone(),
            auth_header: basic_auth_header(&config.account_sid, &config.auth_token),
            agent: Arc::new(agent),
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, account_sid: AccountSid, auth_token: &AuthToken) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            lookup_url: base_url.clone(),
            base_url,
            auth_header: basic_auth_header(&account_sid, auth_token),
            account_sid,
            agent: Arc::new(agent),
        }
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn messages_path(&self) -> String {
        format!("/2010-04-01/Accounts/{}/Messages.json", self.account_sid)
    }

    fn message_path(&self, sid: &MessageSid) -> String {
        format!(
            "/2010-04-01/Accounts/{}/Messages/{}.json",
            self.account_sid, sid
        )
    }

    /// Execute a GET request with authentication.
    fn get(&self, url: &str) -> Result<ureq::Response, SmsApiError> {
        tracing::debug!("GET {}", url);
        self.agent
            .get(url)
            .set("Authorization", &self.auth_header)
            .call()
            .map_err(map_error)
    }

    /// Execute a POST request with authentication and a form-encoded body.
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<ureq::Response, SmsApiError> {
        tracing::debug!("POST {}", url);
        let result = self
            .agent
            .post(url)
            .set("Authorization", &self.auth_header)
            .send_form(form)
            .map_err(map_error);

        if let Err(e) = &result {
            tracing::error!("POST {} - Error: {:?}", url, e);
        }
        result
    }

    /// Execute a DELETE request with authentication.
    fn delete(&self, url: &str) -> Result<ureq::Response, SmsApiError> {
        tracing::debug!("DELETE {}", url);
        self.agent
            .delete(url)
            .set("Authorization", &self.auth_header)
            .call()
            .map_err(map_error)
    }

    fn read_json<T: serde::de::DeserializeOwned>(response: ureq::Response) -> SmsApiResult<T> {
        let body = response
            .into_string()
            .map_err(|e| SmsApiError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(SmsApiError::JsonError)
    }

    // ========================= Message Operations =========================

    /// Submit a new outgoing message.
    pub fn create_message(
        &self,
        to: &PhoneNumber,
        from: &PhoneNumber,
        body: &str,
    ) -> SmsApiResult<MessagePayload> {
        let url = self.build_url(&self.messages_path());
        let response = self.post_form(
            &url,
            &[("To", to.as_str()), ("From", from.as_str()), ("Body", body)],
        )?;
        Self::read_json(response)
    }

    /// Fetch a single message by sid.
    pub fn fetch_message(&self, sid: &MessageSid) -> SmsApiResult<MessagePayload> {
        let url = self.build_url(&self.message_path(sid));
        let response = self.get(&url)?;
        Self::read_json(response)
    }

    /// Overwrite a message body (the provider accepts only the empty string).
    pub fn update_message_body(&self, sid: &MessageSid, body: &str) -> SmsApiResult<MessagePayload> {
        let url = self.build_url(&self.message_path(sid));
        let response = self.post_form(&url, &[("Body", body)])?;
        Self::read_json(response)
    }

    /// Delete a message. Returns the provider's success flag.
    pub fn delete_message(&self, sid: &MessageSid) -> SmsApiResult<bool> {
        let url = self.build_url(&self.message_path(sid));
        self.delete(&url)?;
        Ok(true)
    }

    /// List up to `page_size` messages from account history.
    ///
    /// Individual rows that fail to deserialize are skipped with a warning
    /// rather than poisoning the page.
    pub fn list_messages(&self, page_size: usize) -> SmsApiResult<Vec<MessagePayload>> {
        let url = format!(
            "{}?PageSize={}",
            self.build_url(&self.messages_path()),
            page_size
        );
        let response = self.get(&url)?;
        let parsed: ListMessagesResponse = Self::read_json(response)?;

        let payloads = parsed
            .messages
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<MessagePayload>(value) {
                Ok(payload) => Some(payload),
                Err(e) => {
                    tracing::warn!("skipping undeserializable message row: {}", e);
                    None
                }
            })
            .collect();
        Ok(payloads)
    }

    // ========================= Lookup Operations =========================

    /// Query carrier information about a phone number.
    pub fn lookup_phone_number(&self, number: &PhoneNumber) -> SmsApiResult<PhoneLookup> {
        let base = self.lookup_url.trim_end_matches('/');
        let url = format!(
            "{}/v2/PhoneNumbers/{}?Fields=line_type_intelligence",
            base,
            number.as_str()
        );
        let response = self.get(&url)?;
        Self::read_json(response)
    }

    // ========================= Usage Operations =========================

    /// List account usage records.
    pub fn list_usage_records(&self) -> SmsApiResult<Vec<UsagePayload>> {
        let url = self.build_url(&format!(
            "/2010-04-01/Accounts/{}/Usage/Records.json",
            self.account_sid
        ));
        let response = self.get(&url)?;
        let parsed: UsageRecordsResponse = Self::read_json(response)?;

        let payloads = parsed
            .usage_records
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<UsagePayload>(value) {
                Ok(payload) => Some(payload),
                Err(e) => {
                    tracing::warn!("skipping undeserializable usage row: {}", e);
                    None
                }
            })
            .collect();
        Ok(payloads)
    }
}

fn basic_auth_header(account_sid: &AccountSid, auth_token: &AuthToken) -> String {
    let credentials = format!("{}:{}", account_sid.as_str(), auth_token.expose());
    format!("Basic {}", BASE64.encode(credentials))
}

/// Map a ureq error to an SmsApiError.
fn map_error(error: ureq::Error) -> SmsApiError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 => SmsApiError::Unauthorized,
                404 => SmsApiError::NotFound(message),
                429 => SmsApiError::RateLimitExceeded,
                _ => SmsApiError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                SmsApiError::HttpError("Connection failed".to_string())
            } else if transport.kind() == ureq::ErrorKind::Io {
                SmsApiError::Timeout
            } else {
                SmsApiError::HttpError(transport.to_string())
            }
        }
    }
}
