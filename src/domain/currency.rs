//! Currency Book
//!
//! Static currency configuration consulted by every parsing step:
//! the ecosystem tokens the bot custodies, the fiat/crypto reference
//! currencies users may price a tip in, and the symbol shorthands.

use serde::{Deserialize, Serialize};

/// Currency symbols accepted in place of their codes
pub const CURRENCY_SYMBOLS: [(&str, &str); 4] = [
    ("Ѧ", "ARK"),
    ("$", "USD"),
    ("€", "EUR"),
    ("£", "GBP"),
];

/// Default length of an ecosystem wallet address
pub const DEFAULT_ADDRESS_LENGTH: usize = 34;

/// A native blockchain asset the bot holds wallets for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemToken {
    /// Ticker code (e.g. "ARK", "DARK")
    pub code: String,
    /// Leading character of every address on this network
    pub address_prefix: char,
    /// Exact address length in characters
    pub address_length: usize,
    /// CoinGecko asset id used for price lookups
    pub coingecko_id: Option<String>,
}

impl EcosystemToken {
    pub fn new(code: &str, address_prefix: char) -> Self {
        Self {
            code: code.to_uppercase(),
            address_prefix,
            address_length: DEFAULT_ADDRESS_LENGTH,
            coingecko_id: None,
        }
    }

    pub fn with_coingecko_id(mut self, id: &str) -> Self {
        self.coingecko_id = Some(id.to_string());
        self
    }
}

/// Ecosystem tokens plus the accepted reference currencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyBook {
    /// Code of the base token amounts default to
    pub base: String,
    /// Configured ecosystem tokens, searched before `accepted`
    pub tokens: Vec<EcosystemToken>,
    /// Accepted fiat/crypto codes (upper-case)
    pub accepted: Vec<String>,
}

impl CurrencyBook {
    pub fn new(base: &str, tokens: Vec<EcosystemToken>, accepted: Vec<String>) -> Self {
        Self {
            base: base.to_uppercase(),
            tokens,
            accepted: accepted.into_iter().map(|c| c.to_uppercase()).collect(),
        }
    }

    /// Look up an ecosystem token by code (case-insensitive)
    pub fn ecosystem_token(&self, code: &str) -> Option<&EcosystemToken> {
        self.tokens
            .iter()
            .find(|t| t.code.eq_ignore_ascii_case(code.trim()))
    }

    pub fn is_ecosystem_token(&self, code: &str) -> bool {
        self.ecosystem_token(code).is_some()
    }

    /// The base token's configuration, if it is one of the ecosystem tokens
    pub fn base_token(&self) -> Option<&EcosystemToken> {
        self.ecosystem_token(&self.base)
    }

    /// True if `code` is an ecosystem token, an accepted currency, or a
    /// known currency symbol
    pub fn is_valid_currency(&self, code: &str) -> bool {
        let code = currency_symbol_to_code(&code.trim().to_uppercase());
        self.is_ecosystem_token(&code) || self.accepted.iter().any(|c| *c == code)
    }

    /// Ecosystem token the given currency settles in: the currency itself
    /// when it is an ecosystem token, otherwise the base token
    pub fn settlement_token(&self, currency: &str) -> String {
        match self.ecosystem_token(currency) {
            Some(token) => token.code.clone(),
            None => self.base.clone(),
        }
    }

    /// Currency codes in lookup order: ecosystem tokens first, then the
    /// accepted list, each longest-first so "DARK" is tried before "ARK"
    pub fn lookup_order(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.tokens.iter().map(|t| t.code.as_str()).collect();
        tokens.sort_by_key(|c| std::cmp::Reverse(c.len()));

        let mut accepted: Vec<&str> = self.accepted.iter().map(String::as_str).collect();
        accepted.sort_by_key(|c| std::cmp::Reverse(c.len()));

        tokens.into_iter().chain(accepted).collect()
    }
}

impl Default for CurrencyBook {
    fn default() -> Self {
        let accepted = [
            "ARK", "AUD", "BRL", "BTC", "CAD", "CHF", "CLP", "CNY", "CZK", "DKK", "ETH", "EUR",
            "GBP", "HKD", "HUF", "IDR", "ILS", "INR", "JPY", "KRW", "LTC", "MXN", "MYR", "NOK",
            "NZD", "PHP", "PKR", "PLN", "RUB", "SEK", "SGD", "THB", "TRY", "TWD", "USD", "ZAR",
        ];

        Self::new(
            "ARK",
            vec![
                EcosystemToken::new("ARK", 'A').with_coingecko_id("ark"),
                EcosystemToken::new("DARK", 'D'),
            ],
            accepted.iter().map(|c| c.to_string()).collect(),
        )
    }
}

/// Replace a currency symbol with its code; anything else is returned as-is
pub fn currency_symbol_to_code(symbol: &str) -> String {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| symbol.to_string())
}

/// Replace every currency symbol inside a string with its code
pub fn replace_currency_symbols(input: &str) -> String {
    CURRENCY_SYMBOLS
        .iter()
        .fold(input.to_string(), |acc, (symbol, code)| acc.replace(symbol, code))
}
