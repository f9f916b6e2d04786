//! Amount/Currency Parsing
//!
//! Pure parsing of combined amount strings such as "10USD", "USD10",
//! "$2,5" or a bare "10". The base-unit value is never computed here;
//! it always comes from the exchange-rate collaborator.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::currency::{replace_currency_symbols, CurrencyBook};

/// Largest integer exactly representable as an IEEE-754 double
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Smallest units per whole ecosystem token
pub const BASE_UNITS_PER_TOKEN: u64 = 100_000_000;

/// A validated amount with its currency and derived base-unit value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountCurrency {
    pub amount: Decimal,
    pub currency: String,
    pub base_unit_value: u64,
}

impl AmountCurrency {
    pub fn new(amount: Decimal, currency: String, base_unit_value: u64) -> Self {
        Self {
            amount,
            currency,
            base_unit_value,
        }
    }

    /// True if the amount converts to at least one base unit
    pub fn has_value(&self) -> bool {
        self.base_unit_value > 0
    }
}

/// Normalize comma decimals to dots
pub fn normalize_decimal(input: &str) -> String {
    input.trim().replace(',', ".")
}

/// Parse a plain unsigned decimal number ("10", "0.5", "2.")
///
/// Signs, exponents, thousands separators and anything else are rejected.
pub fn parse_number(input: &str) -> Option<Decimal> {
    let s = input.trim();
    if s.is_empty() || !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if s.matches('.').count() > 1 {
        return None;
    }

    let s = s.strip_suffix('.').unwrap_or(s);
    if let Some(fraction) = s.strip_prefix('.') {
        return Decimal::from_str(&format!("0.{fraction}")).ok();
    }
    Decimal::from_str(s).ok()
}

/// True if the token is a plain number after comma normalization
pub fn is_numeric(token: &str) -> bool {
    parse_number(&normalize_decimal(token)).is_some()
}

/// True if the token parses as a number greater than zero
pub fn is_positive_number(token: &str) -> bool {
    parse_number(&normalize_decimal(token)).is_some_and(|n| n > Decimal::ZERO)
}

/// Amount must be positive and not exceed `MAX_SAFE_INTEGER`
pub fn is_acceptable_amount(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= Decimal::from(MAX_SAFE_INTEGER)
}

/// Parse a combined amount/currency string
///
/// A purely numeric string is priced in the base currency. Otherwise the
/// string must start or end with a known currency code (ecosystem tokens
/// searched first, then the accepted list) and the remainder must be a
/// number. Returns `None` for anything else, including amounts outside
/// `(0, MAX_SAFE_INTEGER]`.
pub fn parse_amount_currency(input: &str, book: &CurrencyBook) -> Option<(Decimal, String)> {
    let normalized = replace_currency_symbols(&normalize_decimal(input).to_uppercase());
    if normalized.is_empty() {
        return None;
    }

    if let Some(amount) = parse_number(&normalized) {
        return is_acceptable_amount(amount).then(|| (amount, book.base.clone()));
    }

    for code in book.lookup_order() {
        let remainders = [normalized.strip_prefix(code), normalized.strip_suffix(code)];
        for remainder in remainders.into_iter().flatten() {
            if let Some(amount) = parse_number(remainder) {
                return is_acceptable_amount(amount).then(|| (amount, code.to_string()));
            }
        }
    }

    None
}

/// Convert whole tokens to base units, truncating any sub-unit remainder
pub fn to_base_units(amount: Decimal) -> Option<u64> {
    amount
        .checked_mul(Decimal::from(BASE_UNITS_PER_TOKEN))?
        .trunc()
        .to_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn book() -> CurrencyBook {
        CurrencyBook::default()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("10"), Some(dec!(10)));
        assert_eq!(parse_number("0.5"), Some(dec!(0.5)));
        assert_eq!(parse_number(".5"), Some(dec!(0.5)));
        assert_eq!(parse_number("2."), Some(dec!(2)));
        assert_eq!(parse_number("-5"), None);
        assert_eq!(parse_number("1e5"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("ten"), None);
    }

    #[test]
    fn test_numeric_helpers() {
        assert!(is_numeric("10"));
        assert!(is_numeric("2,5"));
        assert!(!is_numeric("10USD"));
        assert!(is_positive_number("1"));
        assert!(!is_positive_number("0"));
        assert!(!is_positive_number("0.0"));
    }

    #[test]
    fn test_amount_before_and_after_code() {
        assert_eq!(parse_amount_currency("10USD", &book()), Some((dec!(10), "USD".to_string())));
        assert_eq!(parse_amount_currency("USD10", &book()), Some((dec!(10), "USD".to_string())));
        assert_eq!(parse_amount_currency("usd10", &book()), Some((dec!(10), "USD".to_string())));
    }

    #[test]
    fn test_bare_number_uses_base_currency() {
        assert_eq!(parse_amount_currency("10", &book()), Some((dec!(10), "ARK".to_string())));
    }

    #[test]
    fn test_comma_decimal() {
        assert_eq!(parse_amount_currency("2,5EUR", &book()), Some((dec!(2.5), "EUR".to_string())));
    }

    #[test]
    fn test_symbols_normalized() {
        assert_eq!(parse_amount_currency("$5", &book()), Some((dec!(5), "USD".to_string())));
        assert_eq!(parse_amount_currency("5€", &book()), Some((dec!(5), "EUR".to_string())));
        assert_eq!(parse_amount_currency("£1", &book()), Some((dec!(1), "GBP".to_string())));
        assert_eq!(parse_amount_currency("Ѧ3", &book()), Some((dec!(3), "ARK".to_string())));
    }

    #[test]
    fn test_longer_token_code_wins() {
        assert_eq!(parse_amount_currency("10DARK", &book()), Some((dec!(10), "DARK".to_string())));
        assert_eq!(parse_amount_currency("10ARK", &book()), Some((dec!(10), "ARK".to_string())));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(parse_amount_currency("0", &book()), None);
        assert_eq!(parse_amount_currency("0USD", &book()), None);
        assert_eq!(parse_amount_currency("9007199254740992", &book()), None);
        assert!(parse_amount_currency("9007199254740991", &book()).is_some());
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_amount_currency("", &book()), None);
        assert_eq!(parse_amount_currency("hello", &book()), None);
        assert_eq!(parse_amount_currency("10DOGE", &book()), None);
        assert_eq!(parse_amount_currency("USD", &book()), None);
        assert_eq!(parse_amount_currency("10USD10", &book()), None);
    }

    #[test]
    fn test_to_base_units() {
        assert_eq!(to_base_units(dec!(1)), Some(100_000_000));
        assert_eq!(to_base_units(dec!(0.123456789)), Some(12_345_678));
        assert_eq!(to_base_units(dec!(0.000000001)), Some(0));
    }
}
