//! Ports Layer - Trait definitions for external collaborators
//!
//! The parser consumes two capabilities it never implements itself:
//! - Exchange rates (amount + currency -> base units)
//! - User existence on a platform
//!
//! `mocks` holds recording test doubles for both.

pub mod directory;
pub mod exchange;
pub mod mocks;

pub use directory::{DirectoryError, UserDirectoryPort};
pub use exchange::{ExchangeError, ExchangeRatePort};
