//! Parse Failures
//!
//! Nothing inside the parsing engine panics or propagates collaborator
//! errors; every entry point ends in a `Command` or a `ParseFailure`.

use serde::Serialize;
use thiserror::Error;

/// Why a reward candidate was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// Not a known user on its platform (or the lookup failed)
    UnknownUser,
    /// A valid user without a resolvable amount or STICKERS marker before it
    NoAmount,
}

/// A reward-list token that looked like a recipient but was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCandidate {
    pub token: String,
    pub reason: SkipReason,
}

impl SkippedCandidate {
    pub fn new(token: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            token: token.into(),
            reason,
        }
    }
}

/// Text that does not form a usable command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("Bot mention not found")]
    NoMention,

    #[error("Bot mention has no command before it")]
    MentionAtStart,

    #[error("No amount or currency could be resolved")]
    NoAmount,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Reward produced no transfers ({} candidates skipped)", skipped.len())]
    EmptyReward { skipped: Vec<SkippedCandidate> },
}
