//! Exchange-rate port
//!
//! Converts an amount priced in any accepted currency into base units of
//! the ecosystem token. Implementations own any caching or batching.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Exchange-rate lookup error type
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Currency not configured: {0}")]
    Unconfigured(String),

    #[error("No price data for {0}")]
    NoPriceData(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Converted value out of range for {amount} {currency}")]
    Overflow { amount: Decimal, currency: String },
}

/// Exchange-rate port trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeRatePort: Send + Sync {
    /// Base-unit value of `amount` priced in `currency`
    async fn exchanged_value(&self, amount: Decimal, currency: &str)
        -> Result<u64, ExchangeError>;
}
