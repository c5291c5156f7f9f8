//! Configuration management
//!
//! Settings live in `settings.json` in the coffer directory:
//! ```json
//! {
//!   "display": { "currency": "USD", "decimalPlaces": 1 },
//!   "logging": { "enabled": true }
//! }
//! ```
//! Fields this crate does not manage are preserved on save. A file that is
//! not valid JSON is never overwritten.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::result::Error;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_DECIMAL_PLACES: u32 = 1;
const MAX_DECIMAL_PLACES: u32 = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    display: DisplaySettings,
    #[serde(default)]
    logging: LoggingSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisplaySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decimal_places: Option<u32>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoggingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
}

/// Coffer configuration (resolved view of settings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// ISO 4217 code used when displaying balances, uppercase
    pub currency: String,
    /// Minimum fractional digits shown for balances
    pub decimal_places: u32,
    /// Whether events are written to logs.duckdb
    pub logging_enabled: bool,
    /// Set when settings.json could not be parsed and defaults were used
    #[serde(skip)]
    pub warning: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            logging_enabled: true,
            warning: None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Normalize a currency code to trimmed uppercase
pub fn normalize_currency(currency: &str) -> String {
    currency.trim().to_uppercase()
}

fn read_settings(settings_path: &Path) -> Result<SettingsFile> {
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(settings_path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", settings_path.display()))
}

impl Config {
    /// Load config from the coffer directory
    ///
    /// Environment overrides (for CI/testing):
    /// - `COFFER_CURRENCY`
    /// - `COFFER_LOGGING` (true/false)
    ///
    /// An unparseable settings.json falls back to defaults and sets `warning`.
    pub fn load(coffer_dir: &Path) -> Result<Self> {
        Self::load_with_env(coffer_dir, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading overrides through `env`
    pub fn load_with_env<F>(coffer_dir: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (raw, warning) = match read_settings(&coffer_dir.join("settings.json")) {
            Ok(raw) => (raw, None),
            Err(e) if e.downcast_ref::<serde_json::Error>().is_some() => (
                SettingsFile::default(),
                Some(format!("{:#}; using defaults", e)),
            ),
            Err(e) => return Err(e),
        };
        let defaults = Config::default();

        let currency = env("COFFER_CURRENCY")
            .or(raw.display.currency)
            .map(|c| normalize_currency(&c))
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.currency);

        let logging_enabled = env("COFFER_LOGGING")
            .and_then(|v| parse_bool(&v))
            .or(raw.logging.enabled)
            .unwrap_or(defaults.logging_enabled);

        Ok(Self {
            currency,
            decimal_places: raw
                .display
                .decimal_places
                .unwrap_or(defaults.decimal_places)
                .min(MAX_DECIMAL_PLACES),
            logging_enabled,
            warning,
        })
    }

    /// Save config to the coffer directory, keeping unmanaged fields
    ///
    /// Fails without writing if the existing file is not valid JSON.
    pub fn save(&self, coffer_dir: &Path) -> Result<()> {
        let settings_path = coffer_dir.join("settings.json");
        let mut settings =
            read_settings(&settings_path).context("refusing to overwrite settings")?;

        settings.display.currency = Some(self.currency.clone());
        settings.display.decimal_places = Some(self.decimal_places);
        settings.logging.enabled = Some(self.logging_enabled);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Set a value by its CLI key (`currency`, `decimal-places`, `logging`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "currency" => {
                let currency = normalize_currency(value);
                if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(Error::Config(format!(
                        "currency must be a 3-letter code, got '{}'",
                        value
                    )));
                }
                self.currency = currency;
            }
            "decimal-places" => {
                let places: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| Error::Config(format!("invalid decimal places '{}'", value)))?;
                if places > MAX_DECIMAL_PLACES {
                    return Err(Error::Config(format!(
                        "decimal places must be at most {}",
                        MAX_DECIMAL_PLACES
                    )));
                }
                self.decimal_places = places;
            }
            "logging" => {
                self.logging_enabled = parse_bool(value)
                    .ok_or_else(|| Error::Config(format!("expected true/false, got '{}'", value)))?;
            }
            other => return Err(Error::Config(format!("unknown setting '{}'", other))),
        }
        Ok(())
    }
}
