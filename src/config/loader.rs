//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching tipbot.toml structure.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::domain::currency::{CurrencyBook, EcosystemToken, DEFAULT_ADDRESS_LENGTH};
use crate::domain::username::DEFAULT_USERNAME_SEPARATOR;

/// Characters allowed in a base58 address
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Main configuration structure matching tipbot.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bot: BotSection,
    pub currencies: CurrenciesSection,
    pub tokens: Vec<TokenSection>,
    /// Price of one base token per currency code, for offline conversion
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
    #[serde(default)]
    pub users: UsersSection,
}

/// Bot identity section
#[derive(Debug, Clone, Deserialize)]
pub struct BotSection {
    /// Mention handle the bot answers to (e.g. "u/arktippr")
    pub handle: String,
    /// Platform assumed when a username carries no suffix
    pub platform: String,
    /// Separator between username and platform
    #[serde(default = "default_separator")]
    pub username_separator: String,
}

fn default_separator() -> String {
    DEFAULT_USERNAME_SEPARATOR.to_string()
}

/// Currency section
#[derive(Debug, Clone, Deserialize)]
pub struct CurrenciesSection {
    /// Base token code; bare amounts are priced in it
    pub base: String,
    /// Accepted fiat/crypto reference currencies
    pub accepted: Vec<String>,
}

/// One ecosystem token
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSection {
    pub code: String,
    /// Leading address character on this network
    pub address_prefix: String,
    #[serde(default = "default_address_length")]
    pub address_length: usize,
    /// CoinGecko asset id for online prices
    #[serde(default)]
    pub coingecko_id: Option<String>,
}

fn default_address_length() -> usize {
    DEFAULT_ADDRESS_LENGTH
}

/// Offline user directory (optional)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UsersSection {
    /// Known usernames per platform
    #[serde(flatten)]
    pub platforms: HashMap<String, Vec<String>>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate bot section
        if self.bot.handle.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "handle cannot be empty".to_string(),
            ));
        }

        if self.bot.platform.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "platform cannot be empty".to_string(),
            ));
        }

        if single_char(&self.bot.username_separator).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "username_separator must be a single character, got '{}'",
                self.bot.username_separator
            )));
        }

        // Validate tokens
        if self.tokens.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one [[tokens]] entry is required".to_string(),
            ));
        }

        for token in &self.tokens {
            let prefix = single_char(&token.address_prefix)
                .filter(|c| BASE58_ALPHABET.contains(*c));
            if prefix.is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "address_prefix for {} must be one base58 character, got '{}'",
                    token.code, token.address_prefix
                )));
            }

            if token.address_length == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "address_length for {} must be > 0",
                    token.code
                )));
            }
        }

        // Validate currencies
        if !self
            .tokens
            .iter()
            .any(|t| t.code.eq_ignore_ascii_case(&self.currencies.base))
        {
            return Err(ConfigError::ValidationError(format!(
                "base currency {} is not a configured token",
                self.currencies.base
            )));
        }

        // Validate rates
        if let Some((code, rate)) = self.rates.iter().find(|(_, rate)| **rate <= Decimal::ZERO) {
            return Err(ConfigError::ValidationError(format!(
                "rate for {} must be > 0, got {}",
                code, rate
            )));
        }

        Ok(())
    }

    /// Username separator as a char (validated on load)
    pub fn username_separator(&self) -> char {
        single_char(&self.bot.username_separator).unwrap_or(DEFAULT_USERNAME_SEPARATOR)
    }
}

impl TokenSection {
    fn to_token(&self) -> EcosystemToken {
        let prefix = single_char(&self.address_prefix).unwrap_or_default();
        EcosystemToken {
            code: self.code.to_uppercase(),
            address_prefix: prefix,
            address_length: self.address_length,
            coingecko_id: self.coingecko_id.clone(),
        }
    }
}

// Conversion from Config to CurrencyBook
impl From<&Config> for CurrencyBook {
    fn from(config: &Config) -> Self {
        CurrencyBook::new(
            &config.currencies.base,
            config.tokens.iter().map(TokenSection::to_token).collect(),
            config.currencies.accepted.clone(),
        )
    }
}

// Conversion from Config to ParserConfig
impl From<&Config> for crate::parser::params::ParserConfig {
    fn from(config: &Config) -> Self {
        crate::parser::params::ParserConfig {
            currencies: CurrencyBook::from(config),
            username_separator: config.username_separator(),
        }
    }
}
