//! Currency/Amount Resolver
//!
//! Resolves the one or two tokens next to an anchor (the bot mention,
//! a reward recipient, a SEND target) into an `AmountCurrency`.
//!
//! Two tokens are joined as `right + left`: the token adjacent to the
//! anchor comes first. Because a currency code may lead or trail the
//! number, the public result does not depend on which side held the code.

use crate::domain::amount::{is_numeric, parse_amount_currency, AmountCurrency};

use super::TipParser;

fn present(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}

/// Join the present tokens into the single string handed to the parser
pub fn combine_tokens(left: Option<&str>, right: Option<&str>) -> Option<String> {
    match (present(left), present(right)) {
        (Some(left), Some(right)) => Some(format!("{right}{left}")),
        (Some(single), None) | (None, Some(single)) => Some(single.to_string()),
        (None, None) => None,
    }
}

impl TipParser {
    /// Resolve an amount and currency, pricing it through the exchange-rate
    /// collaborator. Any failure, including the collaborator's, is `None`.
    pub async fn resolve(&self, left: Option<&str>, right: Option<&str>) -> Option<AmountCurrency> {
        let combined = combine_tokens(left, right)?;
        let (amount, currency) = parse_amount_currency(&combined, &self.config.currencies)?;

        match self.rates.exchanged_value(amount, &currency).await {
            Ok(base_unit_value) => Some(AmountCurrency::new(amount, currency, base_unit_value)),
            Err(e) => {
                tracing::debug!("Exchange lookup failed for {} {}: {}", amount, currency, e);
                None
            }
        }
    }

    /// Whether the token two places before an anchor may take part in
    /// resolution: it must be a currency, or a number whose neighbour is not
    /// also a number. Stray prose and duplicated numerals are discarded so
    /// only the adjacent token is trusted.
    pub fn is_valid_left_input(&self, left: &str, right: &str) -> bool {
        self.config.currencies.is_valid_currency(left) || (is_numeric(left) && !is_numeric(right))
    }

    /// Resolve the tokens before an anchor, discarding an untrustworthy left
    /// token first
    pub async fn resolve_before_anchor(
        &self,
        left: Option<&str>,
        right: Option<&str>,
    ) -> Option<AmountCurrency> {
        let left = match (left, right) {
            (Some(l), Some(r)) if self.is_valid_left_input(l, r) => Some(l),
            (Some(l), None) => Some(l),
            _ => None,
        };
        self.resolve(left, right).await
    }
}
