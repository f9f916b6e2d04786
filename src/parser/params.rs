//! Parser Parameters
//!
//! Static configuration read by every parse call.

use crate::domain::currency::CurrencyBook;
use crate::domain::username::DEFAULT_USERNAME_SEPARATOR;

/// Main parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Ecosystem tokens and accepted currencies
    pub currencies: CurrencyBook,
    /// Separator between username and platform ("alice@twitter")
    pub username_separator: char,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            currencies: CurrencyBook::default(),
            username_separator: DEFAULT_USERNAME_SEPARATOR,
        }
    }
}

impl ParserConfig {
    pub fn with_currencies(mut self, currencies: CurrencyBook) -> Self {
        self.currencies = currencies;
        self
    }

    pub fn with_username_separator(mut self, separator: char) -> Self {
        self.username_separator = separator;
        self
    }
}
