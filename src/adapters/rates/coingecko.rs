use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::domain::amount::to_base_units;
use crate::domain::currency::CurrencyBook;
use crate::ports::{ExchangeError, ExchangeRatePort};

const COINGECKO_PRICE_API: &str = "https://api.coingecko.com/api/v3/simple/price";

/// `{"ark": {"usd": 0.31}}`
type PriceResponse = HashMap<String, HashMap<String, f64>>;

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: Client,
    api_url: String,
    currencies: CurrencyBook,
}

impl CoinGeckoClient {
    pub fn new(currencies: CurrencyBook) -> Result<Self, ExchangeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            api_url: COINGECKO_PRICE_API.to_string(),
            currencies,
        })
    }

    /// Point the client at another API root (tests, proxies)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    /// Price of one base token in `currency`
    pub async fn get_price(&self, currency: &str) -> Result<Decimal, ExchangeError> {
        let id = self
            .currencies
            .base_token()
            .and_then(|t| t.coingecko_id.as_deref())
            .ok_or_else(|| ExchangeError::Unconfigured(self.currencies.base.clone()))?;
        let vs = currency.to_lowercase();
        let url = format!("{}?ids={}&vs_currencies={}", self.api_url, id, vs);

        let response: PriceResponse = self.http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        extract_price(&response, id, &vs)
            .ok_or_else(|| ExchangeError::NoPriceData(currency.to_string()))
    }
}

fn extract_price(response: &PriceResponse, id: &str, vs: &str) -> Option<Decimal> {
    response
        .get(id)
        .and_then(|prices| prices.get(vs))
        .and_then(|price| Decimal::from_f64(*price))
        .filter(|price| *price > Decimal::ZERO)
}

#[async_trait]
impl ExchangeRatePort for CoinGeckoClient {
    async fn exchanged_value(&self, amount: Decimal, currency: &str) -> Result<u64, ExchangeError> {
        let overflow = || ExchangeError::Overflow {
            amount,
            currency: currency.to_string(),
        };

        if self.currencies.is_ecosystem_token(currency) {
            return to_base_units(amount).ok_or_else(overflow);
        }

        let price = self.get_price(currency).await?;
        tracing::debug!("1 {} = {} {}", self.currencies.base, price, currency);

        amount
            .checked_div(price)
            .and_then(to_base_units)
            .ok_or_else(overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_client_creation() {
        let client = CoinGeckoClient::new(CurrencyBook::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_extract_price() {
        let response: PriceResponse = serde_json::from_str(r#"{"ark": {"usd": 0.25, "eur": 0}}"#).unwrap();
        assert_eq!(extract_price(&response, "ark", "usd"), Some(dec!(0.25)));
        assert_eq!(extract_price(&response, "ark", "eur"), None);
        assert_eq!(extract_price(&response, "ark", "gbp"), None);
        assert_eq!(extract_price(&response, "btc", "usd"), None);
    }

    #[tokio::test]
    async fn test_ecosystem_tokens_skip_http() {
        // Unroutable API root: any HTTP call would fail
        let client = CoinGeckoClient::new(CurrencyBook::default())
            .unwrap()
            .with_api_url("http://127.0.0.1:9");
        assert_eq!(client.exchanged_value(dec!(3), "ARK").await.unwrap(), 300_000_000);
    }

    #[tokio::test]
    async fn test_base_without_coingecko_id() {
        let book = CurrencyBook::new("DARK", CurrencyBook::default().tokens, vec!["USD".to_string()]);
        let client = CoinGeckoClient::new(book).unwrap();
        let result = client.exchanged_value(dec!(1), "USD").await;
        assert!(matches!(result, Err(ExchangeError::Unconfigured(_))));
    }
}
