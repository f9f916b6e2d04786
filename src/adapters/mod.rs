//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Rates: fixed config table and CoinGecko price API
//! - Users: config allow-lists and Reddit account lookups
//! - CLI: Command-line interface handlers

pub mod cli;
pub mod rates;
pub mod users;

pub use cli::CliApp;
pub use rates::{CoinGeckoClient, FixedRateTable};
pub use users::{AllowListDirectory, RedditUserClient};
