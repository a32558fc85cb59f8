//! Message record model: the validated, immutable form of one provider
//! message, plus the raw wire payload it is parsed from.

use crate::domain::{FieldError, MessageSid, PhoneNumber, RecordValidationError, ValidationError};
use crate::text::sanitize;
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Maximum message body length accepted by the provider.
pub const MAX_BODY_LEN: usize = 1600;

/// Sentinel body value the provider stores for a redacted message.
pub const REDACTED_BODY: &str = "";

static EMOJI_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}\s]+)\}").expect("static pattern"));

/// Timestamp (de)serialization for snapshot output.
///
/// All datetime fields are encoded as `"YYYY-MM-DD HH:MM:SS"` in UTC.
pub mod datetime_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    /// Snapshot timestamp layout.
    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Provider price fields arrive as a number, a numeric string, or null.
/// Anything unparseable is treated as absent rather than failing the batch.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Raw message JSON as returned by the provider.
///
/// Deliberately lenient: every field is defaulted so one null or missing
/// value cannot poison a whole list response. Strictness lives in
/// [`MessageRecord::from_payload`], which validates field by field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub sid: String,

    #[serde(default)]
    pub status: String,

    #[serde(default, rename = "from")]
    pub from_number: String,

    #[serde(default, rename = "to")]
    pub to_number: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub date_created: Option<String>,

    #[serde(default)]
    pub date_sent: Option<String>,

    #[serde(default)]
    pub date_updated: Option<String>,

    #[serde(default)]
    pub direction: String,

    #[serde(default)]
    pub error_code: Option<i64>,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub num_media: String,

    #[serde(default)]
    pub num_segments: String,

    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<f64>,

    #[serde(default)]
    pub price_unit: Option<String>,
}

/// One validated, immutable provider message.
///
/// Constructed once per provider response via [`MessageRecord::from_payload`]
/// and never mutated; observing a remote change (e.g. redaction) means
/// re-fetching into a new record. The body is always the sanitized form —
/// raw provider text never escapes unprocessed. `emoji_count` and
/// `is_redacted` are derived once at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRecord {
    pub sid: MessageSid,
    pub status: String,
    pub from_number: PhoneNumber,
    pub to_number: PhoneNumber,
    pub body: String,
    #[serde(with = "datetime_format")]
    pub date_created: DateTime<Utc>,
    #[serde(with = "datetime_format")]
    pub date_sent: DateTime<Utc>,
    #[serde(with = "datetime_format")]
    pub date_updated: DateTime<Utc>,
    pub direction: String,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
    pub num_media: String,
    pub num_segments: String,
    pub price: f64,
    pub price_unit: String,
    pub emoji_count: usize,
    pub is_redacted: bool,
}

impl MessageRecord {
    /// Validate and convert a raw payload into a record.
    ///
    /// All fields are validated before returning, so the error lists every
    /// failing field rather than only the first one.
    ///
    /// # Errors
    ///
    /// Returns `RecordValidationError` aggregating one `FieldError` per
    /// invalid field.
    pub fn from_payload(payload: &MessagePayload) -> Result<Self, RecordValidationError> {
        let sid = MessageSid::new(payload.sid.clone());
        let from_number = PhoneNumber::new(payload.from_number.clone());
        let to_number = PhoneNumber::new(payload.to_number.clone());
        let date_created = parse_timestamp("date_created", payload.date_created.as_deref());
        let date_sent = parse_timestamp("date_sent", payload.date_sent.as_deref());
        let date_updated = parse_timestamp("date_updated", payload.date_updated.as_deref());

        let mut fields = Vec::new();
        collect("sid", &sid, &mut fields);
        collect("from_number", &from_number, &mut fields);
        collect("to_number", &to_number, &mut fields);
        collect("date_created", &date_created, &mut fields);
        collect("date_sent", &date_sent, &mut fields);
        collect("date_updated", &date_updated, &mut fields);

        match (sid, from_number, to_number, date_created, date_sent, date_updated) {
            (Ok(sid), Ok(from_number), Ok(to_number), Ok(date_created), Ok(date_sent), Ok(date_updated)) => {
                let body = sanitize(&payload.body);
                let emoji_count = count_emoji_tokens(&body);
                let is_redacted = body == REDACTED_BODY;

                Ok(Self {
                    sid,
                    status: payload.status.clone(),
                    from_number,
                    to_number,
                    body,
                    date_created,
                    date_sent,
                    date_updated,
                    direction: payload.direction.clone(),
                    error_code: payload.error_code,
                    error_message: payload.error_message.clone(),
                    num_media: payload.num_media.clone(),
                    num_segments: payload.num_segments.clone(),
                    price: payload.price.unwrap_or(0.0),
                    price_unit: payload.price_unit.clone().unwrap_or_default(),
                    emoji_count,
                    is_redacted,
                })
            }
            _ => Err(RecordValidationError { fields }),
        }
    }
}

fn collect<T>(field: &'static str, result: &Result<T, ValidationError>, out: &mut Vec<FieldError>) {
    if let Err(error) = result {
        out.push(FieldError {
            field,
            error: error.clone(),
        });
    }
}

/// Parse a provider timestamp. The wire format is RFC 2822; RFC 3339 and the
/// snapshot layout are accepted as fallbacks.
fn parse_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> Result<DateTime<Utc>, ValidationError> {
    let raw = value.ok_or(ValidationError::MissingField { field })?;
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, datetime_format::FORMAT) {
        return Ok(naive.and_utc());
    }
    Err(ValidationError::InvalidTimestamp {
        field,
        value: raw.to_string(),
    })
}

/// Count distinct `{name}` emoji tokens in a sanitized body.
fn count_emoji_tokens(body: &str) -> usize {
    let unique: HashSet<&str> = EMOJI_TOKEN
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    unique.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> MessagePayload {
        MessagePayload {
            sid: "SM0123456789abcdef0123456789abcdef".to_string(),
            status: "delivered".to_string(),
            from_number: "+13035551000".to_string(),
            to_number: "+13604442000".to_string(),
            body: "hello \u{1F44D} world".to_string(),
            date_created: Some("Mon, 16 Aug 2021 20:15:31 +0000".to_string()),
            date_sent: Some("Mon, 16 Aug 2021 20:15:33 +0000".to_string()),
            date_updated: Some("Mon, 16 Aug 2021 20:15:33 +0000".to_string()),
            direction: "outbound-api".to_string(),
            error_code: None,
            error_message: None,
            num_media: "0".to_string(),
            num_segments: "1".to_string(),
            price: Some(-0.0075),
            price_unit: Some("USD".to_string()),
        }
    }

    #[test]
    fn test_parse_sanitizes_body_and_derives_fields() {
        let record = MessageRecord::from_payload(&payload()).unwrap();
        assert_eq!(record.body, "hello {thumbs_up} world");
        assert_eq!(record.emoji_count, 1);
        assert!(!record.is_redacted);
    }

    #[test]
    fn test_parse_empty_body_is_redacted() {
        let mut raw = payload();
        raw.body = REDACTED_BODY.to_string();
        let record = MessageRecord::from_payload(&raw).unwrap();
        assert!(record.is_redacted);
        assert_eq!(record.emoji_count, 0);
    }

    #[test]
    fn test_emoji_count_is_distinct() {
        let mut raw = payload();
        raw.body = "\u{1F44D} \u{1F44D} \u{1F680}".to_string();
        let record = MessageRecord::from_payload(&raw).unwrap();
        assert_eq!(record.body, "{thumbs_up} {thumbs_up} {rocket}");
        assert_eq!(record.emoji_count, 2);
    }

    #[test]
    fn test_parse_rejects_bad_sid() {
        let mut raw = payload();
        raw.sid = "XX123".to_string();
        let err = MessageRecord::from_payload(&raw).unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, "sid");
    }

    #[test]
    fn test_parse_aggregates_every_failing_field() {
        let mut raw = payload();
        raw.sid = "bogus".to_string();
        raw.to_number = "not-a-number".to_string();
        raw.date_sent = None;
        let err = MessageRecord::from_payload(&raw).unwrap_err();
        let failing: Vec<&str> = err.fields.iter().map(|f| f.field).collect();
        assert_eq!(failing, vec!["sid", "to_number", "date_sent"]);
    }

    #[test]
    fn test_parse_normalizes_numbers() {
        let mut raw = payload();
        raw.from_number = "303-555-1000".to_string();
        let record = MessageRecord::from_payload(&raw).unwrap();
        assert_eq!(record.from_number.as_str(), "+13035551000");
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let mut raw = payload();
        raw.price = None;
        let record = MessageRecord::from_payload(&raw).unwrap();
        assert_eq!(record.price, 0.0);
    }

    #[test]
    fn test_datetime_serializes_as_snapshot_format() {
        let record = MessageRecord::from_payload(&payload()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date_created"], "2021-08-16 20:15:31");
        assert_eq!(json["date_sent"], "2021-08-16 20:15:33");
        assert_eq!(json["emoji_count"], 1);
        assert_eq!(json["is_redacted"], false);
    }

    #[test]
    fn test_timestamp_fallback_formats() {
        let mut raw = payload();
        raw.date_created = Some("2021-08-16T20:15:31+00:00".to_string());
        raw.date_updated = Some("2021-08-16 20:15:31".to_string());
        let record = MessageRecord::from_payload(&raw).unwrap();
        assert_eq!(record.date_created, record.date_updated);
    }

    #[test]
    fn test_payload_deserializes_provider_json() {
        let raw: MessagePayload = serde_json::from_str(
            r#"{
                "sid": "SM0123456789abcdef0123456789abcdef",
                "status": "sent",
                "from": "+13035551000",
                "to": "+13604442000",
                "body": "hi",
                "date_created": "Mon, 16 Aug 2021 20:15:31 +0000",
                "date_sent": null,
                "date_updated": "Mon, 16 Aug 2021 20:15:33 +0000",
                "direction": "outbound-api",
                "error_code": null,
                "error_message": null,
                "num_media": "0",
                "num_segments": "1",
                "price": "-0.00750",
                "price_unit": "USD",
                "uri": "/2010-04-01/Accounts/AC.../Messages/SM....json"
            }"#,
        )
        .unwrap();
        assert_eq!(raw.from_number, "+13035551000");
        assert_eq!(raw.price, Some(-0.0075));
        assert!(raw.date_sent.is_none());
    }
}
