//! Configuration loading from TOML.
//!
//! Reads `bidask.toml` (or the file named by `BIDASK_CONFIG`) and
//! deserializes into strongly-typed structs. Every section is optional;
//! a missing file yields the built-in defaults.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::query::Preferences;
use crate::types::{BidAskError, CurrencyFormat, Role};

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "bidask.toml";

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_ENV: &str = "BIDASK_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Stake used when the user does not give one.
    pub amount: Decimal,
    pub currency_prefix: String,
    pub currency_postfix: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        let currency = CurrencyFormat::default();
        Self {
            amount: dec!(10),
            currency_prefix: currency.prefix,
            currency_postfix: currency.postfix,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_as_jst: bool,
    pub is_counterer: bool,
    /// Where the remembered toggles are stored.
    pub preferences_file: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_as_jst: true,
            is_counterer: true,
            preferences_file: "bidask_prefs.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `BIDASK_CONFIG` or `bidask.toml`, falling back to the
    /// defaults when the file does not exist.
    pub fn load_or_default() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        if !Path::new(&path).exists() {
            info!(path = %path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    fn validate(&self) -> Result<(), BidAskError> {
        if self.calculator.amount <= Decimal::ZERO {
            return Err(BidAskError::Config(format!(
                "calculator.amount must be positive, got {}",
                self.calculator.amount
            )));
        }
        Ok(())
    }

    /// Form defaults derived from this config.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            value: String::new(),
            amount: self.calculator.amount,
            currency: CurrencyFormat {
                prefix: self.calculator.currency_prefix.clone(),
                postfix: self.calculator.currency_postfix.clone(),
            },
            show_as_jst: self.display.show_as_jst,
            role: Role::from_countering(self.display.is_counterer),
        }
    }
}
