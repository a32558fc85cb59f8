//! SMS Gateway - demo driver
//!
//! Walks one test message through its whole lifecycle against the provider:
//! send (random emoji payload) -> fetch -> redact -> fetch -> delete, then
//! exports account message history and usage records as JSON snapshots.
//! Every step is best-effort: a failed step is logged and the sequence
//! continues.

use anyhow::Result;
use clap::Parser;
use sms_gateway::provider::MessageProvider;
use sms_gateway::text::compose_random_message;
use sms_gateway::{Config, Environment, PhoneNumber, SmsGateway, TwilioRestClient};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sms-gateway", about = "SMS gateway demo driver", version)]
struct Cli {
    /// Provider environment: LIVE or TEST
    #[arg(short, long, default_value = "LIVE")]
    environment: String,

    /// Override the sending number (example: '3035551000')
    #[arg(short, long)]
    from_number: Option<String>,

    /// Override the validated recipient number (example: '3604442000')
    #[arg(short, long)]
    to_number: Option<String>,
}

/// Strict gate for user-supplied numbers: exactly 10 national digits after
/// separator stripping (an 11-digit input may carry a leading trunk '1').
/// Deliberately stricter than the configuration-level normalizer.
fn parse_cli_number(flag: &str, raw: &str) -> Result<PhoneNumber> {
    let mut digits: String = raw.chars().filter(|&c| !matches!(c, ' ' | '-')).collect();
    if digits.len() == 11 && digits.starts_with('1') {
        digits.remove(0);
    }
    if digits.chars().count() != 10 {
        anyhow::bail!(
            "{}: '{}' != 10 characters (area code, prefix, and line number only)",
            flag,
            digits
        );
    }
    PhoneNumber::normalize(&digits)
        .ok_or_else(|| anyhow::anyhow!("{}: invalid number '{}'", flag, raw))
}

fn main() -> Result<()> {
    // Logging to stderr, level taken from RUST_LOG when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Apply command-line overrides
    config.environment = cli.environment.parse::<Environment>()?;
    if let Some(raw) = cli.from_number.as_deref() {
        config.from_number = parse_cli_number("from_number", raw)?;
    }
    if let Some(raw) = cli.to_number.as_deref() {
        config.to_number = parse_cli_number("to_number", raw)?;
    }

    info!(
        "Starting SMS gateway demo against {} ({})",
        config.api_base_url, config.environment
    );

    let client = TwilioRestClient::new(&config);
    let provider = Arc::new(client) as Arc<dyn MessageProvider>;
    let gateway = SmsGateway::new(&config, provider);

    let start = Instant::now();
    run_demo(&config, &gateway);
    info!("demo finished ({:.2} seconds)", start.elapsed().as_secs_f64());

    Ok(())
}

fn run_demo(config: &Config, gateway: &SmsGateway) {
    let identity = format!(
        "{} (v{}) {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    // step 1: send test SMS message with random text (+emoji) to the
    // validated recipient
    let payload = compose_random_message(&identity, 6);
    let sid = gateway.send_text(&config.to_number, &payload);

    match sid {
        Some(sid) => {
            // step 2: extract the test message by identifier
            gateway.fetch_and_save(sid.as_str(), "before_redaction.json");
            // step 3: redact the message body
            gateway.redact(sid.as_str());
            // step 4: validate redaction results
            gateway.fetch_and_save(sid.as_str(), "after_redaction.json");
            // step 5: delete the test message
            gateway.delete(sid.as_str());
        }
        None => warn!("send failed; skipping message lifecycle steps"),
    }

    // step 6: extract entire message history for the account
    gateway.extract_history("text_message_history.json");
    // step 7: extract account usage records
    gateway.extract_usage("usage_records.json");
}
