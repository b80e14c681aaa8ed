//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: `http://localhost:3000`)
//! - `MENU_PATH` - Menu catalog JSON (default: `crates/storefront/data/menu.json`)
//! - `QR_AMOUNT_MULTIPLIER` - Factor applied to the total on the QR panel (default: 35)
//! - `TOAST_DURATION_MS` - Default notification display time, at most one hour
//!   (default: 5000)
//! - `CART_TOAST_DURATION_MS` - Add/remove notification display time, at most
//!   one hour (default: 2000)
//! - `SESSION_IDLE_MINUTES` - Checkout session idle timeout, 1 to 10080 minutes
//!   (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use thai_orchid_core::CurrencyCode;

use crate::checkout::SessionSettings;

/// Accepted toast durations in milliseconds.
const TOAST_DURATION_MS: RangeInclusive<u64> = 0..=60 * 60 * 1000;

/// Accepted session idle timeouts in minutes (one minute to one week).
const SESSION_IDLE_MINUTES: RangeInclusive<u64> = 1..=7 * 24 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Menu catalog file
    pub menu_path: PathBuf,
    /// Checkout behaviour shared by every session
    pub checkout: CheckoutConfig,
    /// How long an untouched checkout session is kept
    pub session_idle: Duration,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Checkout display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub qr_multiplier: Decimal,
    pub toast_duration: Duration,
    pub cart_toast_duration: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        let defaults = SessionSettings::default();
        Self {
            qr_multiplier: defaults.qr_multiplier,
            toast_duration: defaults.default_notification,
            cart_toast_duration: defaults.cart_notification,
        }
    }
}

impl CheckoutConfig {
    /// Settings handed to each new checkout session.
    #[must_use]
    pub const fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            cart_notification: self.cart_toast_duration,
            default_notification: self.toast_duration,
            qr_multiplier: self.qr_multiplier,
            currency: CurrencyCode::THB,
        }
    }
}

/// Sentry configuration. Sentry stays disabled without a DSN.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            menu_path: PathBuf::from("crates/storefront/data/menu.json"),
            checkout: CheckoutConfig::default(),
            session_idle: Duration::from_secs(30 * 60),
            sentry: SentryConfig {
                sample_rate: 1.0,
                ..SentryConfig::default()
            },
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let menu_path = PathBuf::from(get_env_or_default(
            "MENU_PATH",
            "crates/storefront/data/menu.json",
        ));

        let qr_multiplier: Decimal = parse_env("QR_AMOUNT_MULTIPLIER", "35")?;
        if qr_multiplier.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "QR_AMOUNT_MULTIPLIER".to_string(),
                "must not be negative".to_string(),
            ));
        }
        let checkout = CheckoutConfig {
            qr_multiplier,
            toast_duration: Duration::from_millis(parse_bounded_env(
                "TOAST_DURATION_MS",
                "5000",
                TOAST_DURATION_MS,
            )?),
            cart_toast_duration: Duration::from_millis(parse_bounded_env(
                "CART_TOAST_DURATION_MS",
                "2000",
                TOAST_DURATION_MS,
            )?),
        };

        let idle_minutes = parse_bounded_env("SESSION_IDLE_MINUTES", "30", SESSION_IDLE_MINUTES)?;

        let sentry = SentryConfig {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        };

        Ok(Self {
            host,
            port,
            base_url,
            menu_path,
            checkout,
            session_idle: Duration::from_secs(idle_minutes * 60),
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse an environment variable that must fall within `range`.
fn parse_bounded_env<T>(
    key: &str,
    default: &str,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Display,
    T::Err: Display,
{
    parse_bounded(key, &get_env_or_default(key, default), &range)
}

fn parse_bounded<T>(key: &str, raw: &str, range: &RangeInclusive<T>) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Display,
    T::Err: Display,
{
    let value = parse_value(key, raw)?;
    if !range.contains(&value) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between {} and {}", range.start(), range.end()),
        ));
    }
    Ok(value)
}
