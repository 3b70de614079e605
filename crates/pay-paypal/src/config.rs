//! # PayPal Configuration
//!
//! Gateway settings: REST credentials, environment, recurring start day.
//! Loaded from environment variables (with `.env` support) or a TOML file.

use pay_core::{PaymentError, PaymentResult, RecurringStart};
use serde::{Deserialize, Serialize};
use std::env;

const LIVE_API_BASE_URL: &str = "https://api.paypal.com";
const SANDBOX_API_BASE_URL: &str = "https://api.sandbox.paypal.com";

/// PayPal environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Live,
    #[default]
    Sandbox,
}

impl Mode {
    /// Anything other than `live` runs against the sandbox
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("live") {
            Mode::Live
        } else {
            Mode::Sandbox
        }
    }

    pub fn api_base_url(&self) -> &'static str {
        match self {
            Mode::Live => LIVE_API_BASE_URL,
            Mode::Sandbox => SANDBOX_API_BASE_URL,
        }
    }
}

/// PayPal REST configuration
#[derive(Clone)]
pub struct PayPalConfig {
    /// REST client ID
    pub client_id: String,

    /// REST client secret
    pub client_secret: String,

    /// Live or sandbox
    pub mode: Mode,

    /// First billing date policy for subscriptions
    pub recurring_start: RecurringStart,

    /// API base URL (derived from mode, overridable for testing)
    pub api_base_url: String,
}

/// On-disk / environment shape before validation
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    client_secret: String,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    recurring_start_date: u8,
    #[serde(default)]
    api_base_url: Option<String>,
}

impl PayPalConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYPAL_CLIENT_ID`
    /// - `PAYPAL_CLIENT_SECRET`
    ///
    /// Optional: `PAYPAL_MODE` (`live` | `sandbox`), `PAYPAL_RECURRING_START_DATE`
    /// (0-31), `PAYPAL_API_BASE_URL`.
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PaymentResult<Self> {
        let recurring_start_date = match lookup("PAYPAL_RECURRING_START_DATE") {
            Some(value) if !value.trim().is_empty() => value.trim().parse::<u8>().map_err(|_| {
                PaymentError::Configuration(format!(
                    "PAYPAL_RECURRING_START_DATE must be a number between 0 and 31, got {:?}",
                    value
                ))
            })?,
            _ => 0,
        };

        Self::from_raw(RawConfig {
            client_id: lookup("PAYPAL_CLIENT_ID").unwrap_or_default(),
            client_secret: lookup("PAYPAL_CLIENT_SECRET").unwrap_or_default(),
            mode: lookup("PAYPAL_MODE"),
            recurring_start_date,
            api_base_url: lookup("PAYPAL_API_BASE_URL"),
        })
    }

    /// Load configuration from a TOML document with top-level keys
    /// `client_id`, `client_secret`, `mode`, `recurring_start_date`.
    pub fn from_toml(toml_str: &str) -> PaymentResult<Self> {
        let raw: RawConfig = toml::from_str(toml_str)
            .map_err(|e| PaymentError::Configuration(format!("Invalid PayPal config: {}", e)))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> PaymentResult<Self> {
        if raw.client_id.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "PayPal client_id is not set".to_string(),
            ));
        }
        if raw.client_secret.trim().is_empty() {
            return Err(PaymentError::Configuration(
                "PayPal client_secret is not set".to_string(),
            ));
        }

        let mode = raw.mode.as_deref().map(Mode::parse).unwrap_or_default();
        let api_base_url = raw
            .api_base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| mode.api_base_url().to_string());

        Ok(Self {
            client_id: raw.client_id,
            client_secret: raw.client_secret,
            mode,
            recurring_start: RecurringStart::from_day(raw.recurring_start_date)?,
            api_base_url,
        })
    }

    /// Create config with explicit values (sandbox, immediate start)
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            mode: Mode::Sandbox,
            recurring_start: RecurringStart::Immediate,
            api_base_url: SANDBOX_API_BASE_URL.to_string(),
        }
    }

    /// Builder: switch environment (resets the API base URL)
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self.api_base_url = mode.api_base_url().to_string();
        self
    }

    /// Builder: set the recurring start policy
    pub fn with_recurring_start(mut self, start: RecurringStart) -> Self {
        self.recurring_start = start;
        self
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_live_mode(&self) -> bool {
        self.mode == Mode::Live
    }
}

impl std::fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("mode", &self.mode)
            .field("recurring_start", &self.recurring_start)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
