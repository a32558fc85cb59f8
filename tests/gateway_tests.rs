//! Orchestrator tests against a call-recording provider double.

mod mocks;

use mocks::MockProvider;
use sms_gateway::domain::{AccountSid, AuthToken, PhoneNumber};
use sms_gateway::models::MessagePayload;
use sms_gateway::{Config, Environment, SmsGateway};
use std::path::Path;
use std::sync::Arc;

const GOOD_SM: &str = "SM0123456789abcdef0123456789abcdef";

fn test_config(data_dir: &Path) -> Config {
    Config {
        environment: Environment::Test,
        account_sid: AccountSid::new("AC0123456789abcdef0123456789abcdef").unwrap(),
        auth_token: AuthToken::new("0123456789abcdef0123456789abcdef").unwrap(),
        from_number: PhoneNumber::normalize("3035551000").unwrap(),
        to_number: PhoneNumber::normalize("3604442000").unwrap(),
        api_base_url: "https://api.example.com".to_string(),
        lookup_base_url: "https://lookups.example.com".to_string(),
        data_dir: data_dir.to_path_buf(),
        request_timeout: 10,
        log_level: "error".to_string(),
    }
}

fn gateway(data_dir: &Path, provider: &MockProvider) -> SmsGateway {
    SmsGateway::new(&test_config(data_dir), Arc::new(provider.clone()))
}

fn payload(body: &str) -> MessagePayload {
    MessagePayload {
        sid: GOOD_SM.to_string(),
        status: "delivered".to_string(),
        from_number: "+13035551000".to_string(),
        to_number: "+13604442000".to_string(),
        body: body.to_string(),
        date_created: Some("Mon, 16 Aug 2021 20:15:31 +0000".to_string()),
        date_sent: Some("Mon, 16 Aug 2021 20:15:33 +0000".to_string()),
        date_updated: Some("Mon, 16 Aug 2021 20:15:33 +0000".to_string()),
        direction: "outbound-api".to_string(),
        num_media: "0".to_string(),
        num_segments: "1".to_string(),
        price_unit: Some("USD".to_string()),
        ..MessagePayload::default()
    }
}

// ========================= local sid gate =========================

#[test]
fn test_malformed_sid_causes_no_provider_calls() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new();
    let gateway = gateway(dir.path(), &provider);

    for bad_sid in ["", "SM123", "AC0123456789abcdef0123456789abcdef", "bogus"] {
        assert!(gateway.fetch_and_save(bad_sid, "out.json").is_none());
        assert!(!gateway.redact(bad_sid));
        assert!(!gateway.delete(bad_sid));
    }

    assert_eq!(provider.total_calls(), 0);
    assert!(!dir.path().join("out.json").exists());
}

// ========================= send =========================

#[test]
fn test_send_returns_provider_sid() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new()
        .with_valid_lookup()
        .with_create_response(payload("hi"));
    let gateway = gateway(dir.path(), &provider);

    let to = PhoneNumber::normalize("3604442000").unwrap();
    let sid = gateway.send_text(&to, "hi").unwrap();

    assert_eq!(sid.as_str(), GOOD_SM);
    assert_eq!(provider.call_count("lookup_phone_number"), 1);
    assert_eq!(provider.call_count("create_message"), 1);
}

#[test]
fn test_send_skips_create_when_lookup_fails() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new().with_create_response(payload("hi"));
    let gateway = gateway(dir.path(), &provider);

    let to = PhoneNumber::normalize("3604442000").unwrap();
    assert!(gateway.send_text(&to, "hi").is_none());

    assert_eq!(provider.call_count("lookup_phone_number"), 1);
    assert_eq!(provider.call_count("create_message"), 0);
}

#[test]
fn test_send_truncates_oversized_body() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new()
        .with_valid_lookup()
        .with_create_response(payload("hi"));
    let gateway = gateway(dir.path(), &provider);

    let to = PhoneNumber::normalize("3604442000").unwrap();
    let oversized = "a".repeat(1700);
    gateway.send_text(&to, &oversized);

    let sent = provider.last_create_body().unwrap();
    assert_eq!(sent.chars().count(), 1600);
}

#[test]
fn test_send_rejects_malformed_provider_sid() {
    let dir = tempfile::tempdir().unwrap();
    let mut bad = payload("hi");
    bad.sid = "not-a-sid".to_string();
    let provider = MockProvider::new()
        .with_valid_lookup()
        .with_create_response(bad);
    let gateway = gateway(dir.path(), &provider);

    let to = PhoneNumber::normalize("3604442000").unwrap();
    assert!(gateway.send_text(&to, "hi").is_none());
}

// ========================= fetch and save =========================

#[test]
fn test_fetch_and_save_sanitizes_and_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new().with_fetch_response(payload("hello \u{1F44D} world"));
    let gateway = gateway(dir.path(), &provider);

    let record = gateway.fetch_and_save(GOOD_SM, "before_redaction.json").unwrap();

    assert_eq!(record.body, "hello {thumbs_up} world");
    assert_eq!(record.emoji_count, 1);
    assert!(!record.is_redacted);

    let content = std::fs::read_to_string(dir.path().join("before_redaction.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["records"][0]["body"], "hello {thumbs_up} world");
    assert_eq!(json["records"][0]["date_sent"], "2021-08-16 20:15:33");
}

#[test]
fn test_fetch_after_redaction_reports_redacted() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new().with_fetch_response(payload(""));
    let gateway = gateway(dir.path(), &provider);

    let record = gateway.fetch_and_save(GOOD_SM, "after_redaction.json").unwrap();

    assert!(record.is_redacted);
    assert_eq!(record.emoji_count, 0);
}

#[test]
fn test_fetch_failure_is_contained() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new(); // no fetch response -> NotFound
    let gateway = gateway(dir.path(), &provider);

    assert!(gateway.fetch_and_save(GOOD_SM, "out.json").is_none());
    assert!(!dir.path().join("out.json").exists());
}

// ========================= redact =========================

#[test]
fn test_redact_requires_sentinel_body() {
    let dir = tempfile::tempdir().unwrap();

    // provider claims success but body survives: not redacted
    let stubborn = MockProvider::new().with_update_response(payload("still here"));
    assert!(!gateway(dir.path(), &stubborn).redact(GOOD_SM));

    // body actually cleared: redacted
    let compliant = MockProvider::new().with_update_response(payload(""));
    assert!(gateway(dir.path(), &compliant).redact(GOOD_SM));
}

// ========================= delete =========================

#[test]
fn test_delete_passes_through_provider_flag() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new();
    let gateway = gateway(dir.path(), &provider);

    assert!(gateway.delete(GOOD_SM));
    assert_eq!(provider.call_count("delete_message"), 1);
}

// ========================= history extraction =========================

#[test]
fn test_extract_history_empty_is_distinguishable() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockProvider::new();
    let gateway = gateway(dir.path(), &provider);

    // zero messages: Some(0), not None, and no snapshot written
    assert_eq!(gateway.extract_history("history.json"), Some(0));
    assert!(!dir.path().join("history.json").exists());
}

#[test]
fn test_extract_history_skips_unparseable_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut bad = payload("broken");
    bad.sid = "garbage".to_string();
    let provider = MockProvider::new().with_list_response(vec![payload("first"), bad, payload("second")]);
    let gateway = gateway(dir.path(), &provider);

    assert_eq!(gateway.extract_history("history.json"), Some(2));

    let content = std::fs::read_to_string(dir.path().join("history.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["records"].as_array().unwrap().len(), 2);
    // provider response order is preserved
    assert_eq!(json["records"][0]["body"], "first");
    assert_eq!(json["records"][1]["body"], "second");
}

// ========================= usage extraction =========================

#[test]
fn test_extract_usage_writes_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let usage = sms_gateway::models::UsagePayload {
        category: "sms".to_string(),
        description: "Short Message Service".to_string(),
        start_date: Some("2021-08-01".to_string()),
        end_date: Some("2021-08-31".to_string()),
        count: "42".to_string(),
        count_unit: "messages".to_string(),
        price: Some(3.75),
        price_unit: Some("USD".to_string()),
        usage: "42".to_string(),
        usage_unit: "messages".to_string(),
    };
    let provider = MockProvider::new().with_usage_response(vec![usage]);
    let gateway = gateway(dir.path(), &provider);

    assert_eq!(gateway.extract_usage("usage_records.json"), Some(1));

    let content = std::fs::read_to_string(dir.path().join("usage_records.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["records"][0]["category"], "sms");
    assert_eq!(json["records"][0]["price"], 3);
}
