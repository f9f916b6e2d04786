//! Exchange-Rate Adapters
//!
//! - `FixedRateTable`: offline prices from the config file
//! - `CoinGeckoClient`: live prices from the CoinGecko simple price API

mod coingecko;
mod fixed;

pub use coingecko::CoinGeckoClient;
pub use fixed::FixedRateTable;
