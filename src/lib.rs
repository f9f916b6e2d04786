//! Tipbot Parser - Mention and command parsing for a custodial tipping bot
//!
//! Converts free-form social-media text into validated transfer commands.
//!
//! # Modules
//!
//! - `domain`: Value types and pure rules (AmountCurrency, Username, Command)
//! - `ports`: Collaborator traits (ExchangeRatePort, UserDirectoryPort)
//! - `parser`: The parsing engine (TipParser)
//! - `adapters`: External implementations (CoinGecko, Reddit, CLI)
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod config;
pub mod domain;
pub mod parser;
pub mod ports;

pub use domain::{AmountCurrency, Command, CommandKind, ParseFailure, Recipient, Transfer, Username};
pub use parser::{ParserConfig, RewardList, TipParser};
