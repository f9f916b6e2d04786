//! Domain Layer - Value types and pure rules of the tipping grammar
//!
//! Everything here is synchronous and free of collaborators:
//! - `currency`: ecosystem tokens, accepted currencies, symbols
//! - `amount`: amount/currency string parsing and base-unit conversion
//! - `username`: mention token to `Username`, reserved-name rules
//! - `address`: withdraw address format checks
//! - `command`: the `Command`/`Transfer` shapes handed to dispatch
//! - `error`: `ParseFailure` and reward skip bookkeeping

pub mod address;
pub mod amount;
pub mod command;
pub mod currency;
pub mod error;
pub mod username;

pub use address::{address_token, validate_address, AddressError};
pub use amount::{
    is_numeric, parse_amount_currency, to_base_units, AmountCurrency, BASE_UNITS_PER_TOKEN,
    MAX_SAFE_INTEGER,
};
pub use command::{Command, CommandKind, Recipient, Transfer, TransferKind, COMMAND_KEYWORDS};
pub use currency::{currency_symbol_to_code, CurrencyBook, EcosystemToken};
pub use error::{ParseFailure, SkipReason, SkippedCandidate};
pub use username::{is_reserved_username, parse_username, Username, DEFAULT_USERNAME_SEPARATOR};
