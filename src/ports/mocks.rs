use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::directory::{DirectoryError, UserDirectoryPort};
use super::exchange::{ExchangeError, ExchangeRatePort};
use crate::domain::amount::to_base_units;

/// Mock exchange-rate port that records calls and converts with fixed
/// prices (one base token = `price` units of the currency)
#[derive(Debug, Default, Clone)]
pub struct MockExchangeRates {
    calls: Arc<Mutex<Vec<(Decimal, String)>>>,
    prices: Arc<Mutex<HashMap<String, Decimal>>>,
}

impl MockExchangeRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the price of one base token in `currency`
    pub fn with_price(self, currency: &str, price: Decimal) -> Self {
        self.prices.lock().unwrap().insert(currency.to_uppercase(), price);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<(Decimal, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExchangeRatePort for MockExchangeRates {
    async fn exchanged_value(&self, amount: Decimal, currency: &str) -> Result<u64, ExchangeError> {
        self.calls.lock().unwrap().push((amount, currency.to_string()));
        let price = self
            .prices
            .lock()
            .unwrap()
            .get(&currency.to_uppercase())
            .copied()
            .ok_or_else(|| ExchangeError::Unconfigured(currency.to_string()))?;

        amount
            .checked_div(price)
            .and_then(to_base_units)
            .ok_or_else(|| ExchangeError::Overflow {
                amount,
                currency: currency.to_string(),
            })
    }
}

/// Mock user directory that records calls and knows a fixed set of users
#[derive(Debug, Default, Clone)]
pub struct MockUserDirectory {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    users: Arc<Mutex<HashSet<(String, String)>>>,
    failing: bool,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register an existing user (case-insensitive)
    pub fn with_user(self, username: &str, platform: &str) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert((username.to_lowercase(), platform.to_lowercase()));
        self
    }

    /// Builder method making every lookup fail
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserDirectoryPort for MockUserDirectory {
    async fn is_existing_user(&self, username: &str, platform: &str) -> Result<bool, DirectoryError> {
        self.calls
            .lock()
            .unwrap()
            .push((username.to_string(), platform.to_string()));
        if self.failing {
            return Err(DirectoryError::UnsupportedPlatform(platform.to_string()));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .contains(&(username.to_lowercase(), platform.to_lowercase())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_exchange_rates() {
        let mock = MockExchangeRates::new()
            .with_price("ARK", dec!(1))
            .with_price("USD", dec!(0.25));

        assert_eq!(mock.exchanged_value(dec!(2), "ARK").await.unwrap(), 200_000_000);
        assert_eq!(mock.exchanged_value(dec!(1), "usd").await.unwrap(), 400_000_000);
        assert!(mock.exchanged_value(dec!(1), "EUR").await.is_err());
        assert_eq!(mock.get_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_user_directory() {
        let mock = MockUserDirectory::new().with_user("Alice", "reddit");

        assert_eq!(mock.is_existing_user("alice", "REDDIT").await.unwrap(), true);
        assert_eq!(mock.is_existing_user("bob", "reddit").await.unwrap(), false);
        assert_eq!(
            mock.get_calls(),
            vec![
                ("alice".to_string(), "REDDIT".to_string()),
                ("bob".to_string(), "reddit".to_string())
            ]
        );

        let failing = MockUserDirectory::new().failing();
        assert!(failing.is_existing_user("alice", "reddit").await.is_err());
    }
}
