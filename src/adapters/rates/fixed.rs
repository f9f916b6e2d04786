//! Fixed Rate Table
//!
//! Offline exchange-rate adapter backed by the `[rates]` config table.
//! Ecosystem tokens convert 1:1; every other currency divides by the
//! configured price of one base token.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::domain::amount::to_base_units;
use crate::domain::currency::CurrencyBook;
use crate::ports::{ExchangeError, ExchangeRatePort};

#[derive(Debug, Clone)]
pub struct FixedRateTable {
    currencies: CurrencyBook,
    /// Price of one base token, keyed by upper-case currency code
    prices: HashMap<String, Decimal>,
}

impl FixedRateTable {
    pub fn new(currencies: CurrencyBook, prices: &HashMap<String, Decimal>) -> Self {
        let prices = prices
            .iter()
            .map(|(code, price)| (code.to_uppercase(), *price))
            .collect();
        Self { currencies, prices }
    }
}

#[async_trait]
impl ExchangeRatePort for FixedRateTable {
    async fn exchanged_value(&self, amount: Decimal, currency: &str) -> Result<u64, ExchangeError> {
        let overflow = || ExchangeError::Overflow {
            amount,
            currency: currency.to_string(),
        };

        if self.currencies.is_ecosystem_token(currency) {
            return to_base_units(amount).ok_or_else(overflow);
        }

        let price = self
            .prices
            .get(&currency.to_uppercase())
            .filter(|p| **p > Decimal::ZERO)
            .ok_or_else(|| ExchangeError::Unconfigured(currency.to_string()))?;

        amount
            .checked_div(*price)
            .and_then(to_base_units)
            .ok_or_else(overflow)
    }
}
