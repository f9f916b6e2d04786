//! Username/Platform Parsing
//!
//! Turns a raw mention token ("u/alice", "@bob", "carol@twitter") into a
//! `Username`. Parsing never fails; whether the result names a real user
//! is decided later by the reserved-word check and the user directory.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::is_positive_number;
use super::command::is_command_keyword;
use super::currency::CurrencyBook;

/// Default separator between username and platform
pub const DEFAULT_USERNAME_SEPARATOR: char = '@';

/// Leading mention markers stripped before splitting
const MENTION_PREFIXES: [&str; 4] = ["/u/", "u/", "U/", "@"];

/// A user on a given platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username {
    pub username: String,
    pub platform: String,
}

impl Username {
    pub fn new(username: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            platform: platform.into(),
        }
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.platform)
    }
}

/// Strip every leading mention marker ("u/", "/u/", "@")
fn strip_mention_prefixes(raw: &str) -> &str {
    let mut body = raw.trim();
    while let Some(stripped) = MENTION_PREFIXES
        .iter()
        .find_map(|prefix| body.strip_prefix(prefix))
    {
        body = stripped;
    }
    body
}

/// Parse a raw token into a username, letting an inline
/// `name<separator>platform` suffix override `context_platform`
pub fn parse_username(raw: &str, context_platform: &str, separator: char) -> Username {
    let body = strip_mention_prefixes(raw);
    let parts: Vec<&str> = body.split(separator).collect();

    match parts.as_slice() {
        [name, platform] if !name.is_empty() && !platform.is_empty() => {
            Username::new(*name, *platform)
        }
        _ => Username::new(body, context_platform),
    }
}

/// True if the name can never be a tip target: empty, a command keyword,
/// a currency code or symbol, or a positive number
pub fn is_reserved_username(name: &str, book: &CurrencyBook) -> bool {
    let name = name.trim();
    name.is_empty()
        || is_command_keyword(name)
        || book.is_valid_currency(name)
        || is_positive_number(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_prefixes() {
        assert_eq!(parse_username("u/alice", "reddit", '@'), Username::new("alice", "reddit"));
        assert_eq!(parse_username("/u/alice", "reddit", '@'), Username::new("alice", "reddit"));
        assert_eq!(parse_username("U/ALICE", "reddit", '@'), Username::new("ALICE", "reddit"));
        assert_eq!(parse_username("@bob", "twitter", '@'), Username::new("bob", "twitter"));
        assert_eq!(parse_username("carol", "reddit", '@'), Username::new("carol", "reddit"));
    }

    #[test]
    fn test_inline_platform_overrides_context() {
        assert_eq!(
            parse_username("dave@twitter", "reddit", '@'),
            Username::new("dave", "twitter")
        );
        assert_eq!(
            parse_username("@dave@twitter", "reddit", '@'),
            Username::new("dave", "twitter")
        );
        assert_eq!(
            parse_username("dave:twitter", "reddit", ':'),
            Username::new("dave", "twitter")
        );
    }

    #[test]
    fn test_ambiguous_split_keeps_context_platform() {
        assert_eq!(parse_username("a@b@c", "reddit", '@'), Username::new("a@b@c", "reddit"));
        assert_eq!(parse_username("dave@", "reddit", '@'), Username::new("dave@", "reddit"));
    }

    #[test]
    fn test_reserved_usernames() {
        let book = CurrencyBook::default();
        for reserved in ["SEND", "withdraw", "USD", "$", "ark", "10", "0.5", "", "  "] {
            assert!(is_reserved_username(reserved, &book), "{reserved} should be reserved");
        }
        for allowed in ["alice", "user1", "0", "dogecoin"] {
            assert!(!is_reserved_username(allowed, &book), "{allowed} should be allowed");
        }
    }
}
