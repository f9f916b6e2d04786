//! Address Format Validation
//!
//! Syntax-only checks for withdraw destinations: network prefix, fixed
//! length and base58 charset. Chain state is never queried.

use thiserror::Error;

use super::currency::{CurrencyBook, EcosystemToken};

/// Why an address failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address length {actual} does not match expected {expected}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Address must start with '{expected}' for {token}")]
    WrongPrefix { expected: char, token: String },

    #[error("Address contains non-base58 characters: {0}")]
    InvalidCharset(String),
}

/// Validate an address against one ecosystem token's format
pub fn validate_address(address: &str, token: &EcosystemToken) -> Result<(), AddressError> {
    let length = address.chars().count();
    if length != token.address_length {
        return Err(AddressError::WrongLength {
            expected: token.address_length,
            actual: length,
        });
    }

    if !address.starts_with(token.address_prefix) {
        return Err(AddressError::WrongPrefix {
            expected: token.address_prefix,
            token: token.code.clone(),
        });
    }

    bs58::decode(address)
        .into_vec()
        .map_err(|e| AddressError::InvalidCharset(e.to_string()))?;

    Ok(())
}

/// First ecosystem token whose address format the address satisfies
pub fn address_token<'a>(address: &str, book: &'a CurrencyBook) -> Option<&'a EcosystemToken> {
    book.tokens
        .iter()
        .find(|token| validate_address(address, token).is_ok())
}
