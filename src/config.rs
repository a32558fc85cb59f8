//! Configuration management for the SMS gateway.
//!
//! Configuration is loaded from environment variables (with `.env` support)
//! and validated through the domain value objects before anything else runs.
//! There is no ambient global state: the resulting `Config` is passed by
//! reference into the constructors that need it.

use crate::domain::{AccountSid, AuthToken, PhoneNumber};
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default provider REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";

/// Default provider phone-lookup base URL.
pub const DEFAULT_LOOKUP_BASE_URL: &str = "https://lookups.twilio.com";

/// Provider environment selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Live,
    Test,
}

impl Environment {
    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "LIVE",
            Self::Test => "TEST",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LIVE" => Ok(Self::Live),
            "TEST" => Ok(Self::Test),
            other => Err(ConfigError::InvalidValue {
                var: "TWILIO_ENVIRONMENT".to_string(),
                reason: format!("'{}' not in [LIVE, TEST]", other),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated configuration for the SMS gateway.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider environment (LIVE or TEST)
    pub environment: Environment,

    /// Account identifier (34 chars, `AC` prefix)
    pub account_sid: AccountSid,

    /// Auth token (32 hex chars)
    pub auth_token: AuthToken,

    /// Default sending number, E.164
    pub from_number: PhoneNumber,

    /// Default recipient number, E.164
    pub to_number: PhoneNumber,

    /// REST API base URL
    pub api_base_url: String,

    /// Phone-lookup base URL
    pub lookup_base_url: String,

    /// Directory snapshot files are written into
    pub data_dir: PathBuf,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Logging level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `TWILIO_ACCOUNT_SID`: account identifier
    /// - `TWILIO_AUTH_TOKEN`: auth token
    /// - `TWILIO_FROM_NUMBER`: default sending number
    /// - `TWILIO_TO_NUMBER`: default recipient number
    ///
    /// Optional environment variables:
    /// - `TWILIO_ENVIRONMENT`: LIVE or TEST (default: LIVE)
    /// - `TWILIO_API_BASE_URL` / `TWILIO_LOOKUP_BASE_URL`: endpoint overrides
    /// - `TWILIO_DATA_DIR`: snapshot output directory (default: "data")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present; missing files are fine
        let _ = dotenvy::dotenv();

        let environment = env::var("TWILIO_ENVIRONMENT")
            .unwrap_or_else(|_| "LIVE".to_string())
            .parse::<Environment>()?;

        let account_sid = AccountSid::new(Self::required("TWILIO_ACCOUNT_SID")?)
            .map_err(|e| Self::invalid("TWILIO_ACCOUNT_SID", e))?;

        let auth_token = AuthToken::new(Self::required("TWILIO_AUTH_TOKEN")?)
            .map_err(|e| Self::invalid("TWILIO_AUTH_TOKEN", e))?;

        let from_number = PhoneNumber::new(Self::required("TWILIO_FROM_NUMBER")?)
            .map_err(|e| Self::invalid("TWILIO_FROM_NUMBER", e))?;

        let to_number = PhoneNumber::new(Self::required("TWILIO_TO_NUMBER")?)
            .map_err(|e| Self::invalid("TWILIO_TO_NUMBER", e))?;

        let api_base_url = env::var("TWILIO_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let lookup_base_url = env::var("TWILIO_LOOKUP_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LOOKUP_BASE_URL.to_string());

        for (var, url) in [
            ("TWILIO_API_BASE_URL", &api_base_url),
            ("TWILIO_LOOKUP_BASE_URL", &lookup_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    var: var.to_string(),
                    reason: "Must start with http:// or https://".to_string(),
                });
            }
        }

        let data_dir = PathBuf::from(env::var("TWILIO_DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            environment,
            account_sid,
            auth_token,
            from_number,
            to_number,
            api_base_url,
            lookup_base_url,
            data_dir,
            request_timeout,
            log_level,
        })
    }

    fn required(var_name: &str) -> ConfigResult<String> {
        env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))
    }

    fn invalid(var_name: &str, error: impl fmt::Display) -> ConfigError {
        ConfigError::InvalidValue {
            var: var_name.to_string(),
            reason: error.to_string(),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}
