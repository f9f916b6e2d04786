//! Parser Layer - Mention and direct-message command parsing
//!
//! Turns free text into validated `Command` values:
//! - `tokenizer`: whitespace tokens, upper-cased or case-preserving
//! - `resolver`: one or two tokens -> `AmountCurrency`
//! - `mention`: bot-mention location, TIP/STICKERS/REWARD classification
//! - `reward`: multi-recipient REWARD lists
//! - `command`: SEND/WITHDRAW/STICKERS/DEPOSIT/BALANCE/HELP
//!
//! The parser holds no mutable state. Collaborator failures are turned
//! into "this candidate fails" at the call that made them.

pub mod command;
pub mod mention;
pub mod params;
pub mod resolver;
pub mod reward;
pub mod tokenizer;

pub use mention::{classify_mention, locate_mention, MentionKind};
pub use params::ParserConfig;
pub use resolver::combine_tokens;
pub use reward::RewardList;
pub use tokenizer::{tokenize, tokenize_preserving};

use std::sync::Arc;

use crate::domain::username::{is_reserved_username, parse_username, Username};
use crate::ports::{ExchangeRatePort, UserDirectoryPort};

/// Stateless parsing engine over its two collaborators
#[derive(Clone)]
pub struct TipParser {
    config: ParserConfig,
    rates: Arc<dyn ExchangeRatePort>,
    users: Arc<dyn UserDirectoryPort>,
}

impl TipParser {
    pub fn new(
        config: ParserConfig,
        rates: Arc<dyn ExchangeRatePort>,
        users: Arc<dyn UserDirectoryPort>,
    ) -> Self {
        Self {
            config,
            rates,
            users,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a raw mention token with the configured separator
    pub fn parse_username(&self, raw: &str, platform: &str) -> Username {
        parse_username(raw, platform, self.config.username_separator)
    }

    /// True if the user is not a reserved word and exists on its platform
    ///
    /// A failed lookup counts as "not a user".
    pub async fn is_valid_user(&self, user: &Username) -> bool {
        if is_reserved_username(&user.username, &self.config.currencies) {
            return false;
        }

        match self
            .users
            .is_existing_user(&user.username, &user.platform)
            .await
        {
            Ok(exists) => exists,
            Err(e) => {
                tracing::debug!("User lookup failed for {}: {}", user, e);
                false
            }
        }
    }
}

impl std::fmt::Debug for TipParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TipParser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mocks::{MockExchangeRates, MockUserDirectory};

    fn parser(users: MockUserDirectory) -> TipParser {
        TipParser::new(
            ParserConfig::default(),
            Arc::new(MockExchangeRates::new()),
            Arc::new(users),
        )
    }

    #[tokio::test]
    async fn test_existing_user_is_valid() {
        let parser = parser(MockUserDirectory::new().with_user("alice", "reddit"));
        assert!(parser.is_valid_user(&Username::new("alice", "reddit")).await);
        assert!(!parser.is_valid_user(&Username::new("alice", "twitter")).await);
    }

    #[tokio::test]
    async fn test_reserved_names_never_reach_directory() {
        let users = MockUserDirectory::new().with_user("send", "reddit");
        let parser = parser(users.clone());

        for name in ["SEND", "USD", "$", "10", "ARK"] {
            assert!(!parser.is_valid_user(&Username::new(name, "reddit")).await);
        }
        assert!(users.get_calls().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_invalid() {
        let parser = parser(MockUserDirectory::new().failing());
        assert!(!parser.is_valid_user(&Username::new("alice", "reddit")).await);
    }

    #[test]
    fn test_parse_username_uses_configured_separator() {
        let parser = TipParser::new(
            ParserConfig::default().with_username_separator(':'),
            Arc::new(MockExchangeRates::new()),
            Arc::new(MockUserDirectory::new()),
        );
        assert_eq!(
            parser.parse_username("u/alice:twitter", "reddit"),
            Username::new("alice", "twitter")
        );
    }
}
