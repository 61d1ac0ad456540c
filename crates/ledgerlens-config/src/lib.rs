//! Configuration management for ledgerlens
//!
//! This module handles loading, validation, and management of
//! ledgerlens configuration from YAML files.

pub mod error;

use ledgerlens_utils::{Locale, NumberStyle, SymbolPosition};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;
pub use error::ConfigResult;

// ==================== Configuration Types ====================

/// Report window granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One calendar month
    Month,
    /// One calendar year
    Year,
}

impl Granularity {
    /// Length of one unit in calendar months
    pub fn months(&self) -> u32 {
        match self {
            Granularity::Month => 1,
            Granularity::Year => 12,
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Month
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" | "annual" => Ok(Granularity::Year),
            _ => Err(format!("Invalid granularity: {}", s)),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}

/// Transaction data location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the JSON transaction snapshot
    #[serde(default = "default_transactions_file")]
    pub transactions_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            transactions_file: default_transactions_file(),
        }
    }
}

fn default_transactions_file() -> PathBuf {
    PathBuf::from("./data/transactions.json")
}

/// Report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Granularity used when none is given on the command line
    #[serde(default)]
    pub default_granularity: Granularity,
    /// Number of categories shown in the expense ranking
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
    /// Language for month labels
    #[serde(default)]
    pub locale: Locale,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_granularity: Granularity::Month,
            top_categories: default_top_categories(),
            locale: Locale::PtBr,
        }
    }
}

fn default_top_categories() -> usize {
    10
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency symbol
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

impl CurrencyConfig {
    /// Number style handed to the formatting helpers
    pub fn number_style(&self) -> NumberStyle {
        NumberStyle {
            symbol: self.symbol.clone(),
            decimal_places: self.decimal_places,
            thousands_separator: self.thousands_separator.clone(),
            decimal_separator: self.decimal_separator.clone(),
            symbol_position: self.symbol_position,
        }
    }
}

fn default_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError { message: e.to_string() })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.report.top_categories == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.top_categories".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        if self.currency.decimal_separator.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_separator".to_string(),
                reason: "Decimal separator must not be empty".to_string(),
            });
        }

        if self.currency.decimal_separator == self.currency.thousands_separator {
            return Err(ConfigError::InvalidValue {
                field: "currency.thousands_separator".to_string(),
                reason: "Thousands and decimal separators must differ".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Default configuration file contents
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}
