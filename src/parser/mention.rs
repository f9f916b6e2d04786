//! Mention Parsing
//!
//! Locates the bot's own mention in a post and classifies it by the
//! keyword right before it:
//! - `... 10 USD u/bot`      -> TIP the parent author
//! - `STICKERS u/bot`        -> STICKERS for the parent author
//! - `REWARD u/bot 10 alice` -> REWARD list (see `reward`)

use crate::domain::command::{Command, CommandKind, Recipient, Transfer, REWARD_KEYWORD, STICKERS_KEYWORD};
use crate::domain::error::ParseFailure;

use super::tokenizer::tokenize;
use super::TipParser;

/// Trailing punctuation tolerated after a mention ("u/bot!")
const TRAILING_PUNCTUATION: &[char] = &[',', '.', '!', '?', ':', ';'];

/// What a located mention asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKind {
    Tip,
    Stickers,
    Reward,
}

fn normalize_mention(token: &str) -> String {
    let token = token.trim().trim_end_matches(TRAILING_PUNCTUATION);
    token.strip_prefix('/').unwrap_or(token).to_uppercase()
}

/// Index of the first token naming `handle`
///
/// A mention in first position has no command before it and fails.
pub fn locate_mention(tokens: &[String], handle: &str) -> Result<usize, ParseFailure> {
    let handle = normalize_mention(handle);
    match tokens.iter().position(|t| normalize_mention(t) == handle) {
        Some(0) => Err(ParseFailure::MentionAtStart),
        Some(index) => Ok(index),
        None => Err(ParseFailure::NoMention),
    }
}

/// Classify a mention from the upper-cased token immediately before it
pub fn classify_mention(tokens: &[String], mention_index: usize) -> MentionKind {
    let previous = mention_index
        .checked_sub(1)
        .and_then(|i| tokens.get(i))
        .map(String::as_str);

    match previous {
        Some(STICKERS_KEYWORD) => MentionKind::Stickers,
        Some(REWARD_KEYWORD) => MentionKind::Reward,
        _ => MentionKind::Tip,
    }
}

impl TipParser {
    /// Parse a public post that mentions the bot
    ///
    /// Mention-derived commands always use the compact reply footer.
    pub async fn parse_mention(
        &self,
        text: &str,
        handle: &str,
        platform: &str,
    ) -> Result<Command, ParseFailure> {
        let tokens = tokenize(text);
        let mention_index = locate_mention(&tokens, handle)?;

        match classify_mention(&tokens, mention_index) {
            MentionKind::Stickers => Ok(Command::with_transfers(
                CommandKind::Stickers,
                vec![Transfer::stickers(Recipient::ParentAuthor)],
            )
            .with_token(self.config.currencies.base.clone())
            .with_small_footer()),
            MentionKind::Reward => {
                let reward = self.build_reward(text, mention_index, platform).await?;
                if !reward.skipped.is_empty() {
                    tracing::debug!("Reward skipped {} candidates", reward.skipped.len());
                }
                Ok(Command::with_transfers(CommandKind::Reward, reward.transfers)
                    .with_token(self.config.currencies.base.clone())
                    .with_small_footer())
            }
            MentionKind::Tip => self.parse_tip(&tokens, mention_index).await,
        }
    }

    async fn parse_tip(&self, tokens: &[String], mention_index: usize) -> Result<Command, ParseFailure> {
        let right = tokens.get(mention_index - 1).map(String::as_str);
        let left = mention_index
            .checked_sub(2)
            .and_then(|i| tokens.get(i))
            .map(String::as_str);

        let amount_currency = self
            .resolve_before_anchor(left, right)
            .await
            .filter(|ac| ac.has_value())
            .ok_or(ParseFailure::NoAmount)?;

        let token = self.config.currencies.settlement_token(&amount_currency.currency);
        Ok(Command::with_transfers(
            CommandKind::Tip,
            vec![Transfer::tip(Recipient::ParentAuthor, amount_currency)],
        )
        .with_token(token)
        .with_small_footer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::TransferKind;
    use crate::parser::ParserConfig;
    use crate::ports::mocks::{MockExchangeRates, MockUserDirectory};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    const HANDLE: &str = "u/arktippr";

    fn parser() -> TipParser {
        let rates = MockExchangeRates::new()
            .with_price("ARK", dec!(1))
            .with_price("DARK", dec!(1))
            .with_price("USD", dec!(0.5))
            .with_price("EUR", dec!(0.4));
        let users = MockUserDirectory::new().with_user("alice", "reddit");
        TipParser::new(ParserConfig::default(), Arc::new(rates), Arc::new(users))
    }

    fn tokens(text: &str) -> Vec<String> {
        tokenize(text)
    }

    #[test]
    fn test_locate_mention() {
        assert_eq!(locate_mention(&tokens("10 u/arktippr"), HANDLE), Ok(1));
        assert_eq!(locate_mention(&tokens("10 /u/ArkTippr!"), HANDLE), Ok(1));
        assert_eq!(locate_mention(&tokens("u/arktippr 10"), HANDLE), Err(ParseFailure::MentionAtStart));
        assert_eq!(locate_mention(&tokens("10 u/someoneelse"), HANDLE), Err(ParseFailure::NoMention));
    }

    #[test]
    fn test_classify_mention() {
        let t = tokens("STICKERS u/arktippr");
        assert_eq!(classify_mention(&t, 1), MentionKind::Stickers);
        let t = tokens("reward u/arktippr 10 alice");
        assert_eq!(classify_mention(&t, 1), MentionKind::Reward);
        let t = tokens("10 u/arktippr");
        assert_eq!(classify_mention(&t, 1), MentionKind::Tip);
    }

    #[tokio::test]
    async fn test_tip_with_currency() {
        let cmd = parser().parse_mention("great post 10 USD u/arktippr", HANDLE, "reddit").await.unwrap();
        assert_eq!(cmd.command, CommandKind::Tip);
        assert_eq!(cmd.small_footer, Some(true));
        assert_eq!(cmd.token.as_deref(), Some("ARK"));

        let transfers = cmd.transfers.unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].recipient, Recipient::ParentAuthor);
        let ac = transfers[0].amount_currency.as_ref().unwrap();
        assert_eq!((ac.amount, ac.currency.as_str()), (dec!(10), "USD"));
        assert_eq!(ac.base_unit_value, 2_000_000_000);
    }

    #[tokio::test]
    async fn test_tip_duplicate_numeral() {
        let cmd = parser().parse_mention("10 10 u/arktippr", HANDLE, "reddit").await.unwrap();
        let ac = cmd.transfers.unwrap()[0].amount_currency.clone().unwrap();
        assert_eq!((ac.amount, ac.currency.as_str()), (dec!(10), "ARK"));
    }

    #[tokio::test]
    async fn test_tip_prose_before_amount() {
        let cmd = parser().parse_mention("I love this post 10 u/arktippr", HANDLE, "reddit").await.unwrap();
        let ac = cmd.transfers.unwrap()[0].amount_currency.clone().unwrap();
        assert_eq!((ac.amount, ac.currency.as_str()), (dec!(10), "ARK"));
    }

    #[tokio::test]
    async fn test_tip_in_devnet_token() {
        let cmd = parser().parse_mention("5 dark u/arktippr", HANDLE, "reddit").await.unwrap();
        assert_eq!(cmd.token.as_deref(), Some("DARK"));
    }

    #[tokio::test]
    async fn test_bare_mention_fails() {
        let parser = parser();
        assert_eq!(
            parser.parse_mention("u/arktippr", HANDLE, "reddit").await,
            Err(ParseFailure::MentionAtStart)
        );
        assert_eq!(
            parser.parse_mention("thanks u/arktippr", HANDLE, "reddit").await,
            Err(ParseFailure::NoAmount)
        );
    }

    #[tokio::test]
    async fn test_stickers_mention() {
        let cmd = parser().parse_mention("stickers u/arktippr", HANDLE, "reddit").await.unwrap();
        assert_eq!(cmd.command, CommandKind::Stickers);
        let transfers = cmd.transfers.unwrap();
        assert_eq!(transfers[0].command, TransferKind::Stickers);
        assert!(transfers[0].amount_currency.is_none());
    }

    #[tokio::test]
    async fn test_reward_mention() {
        let cmd = parser()
            .parse_mention("REWARD u/arktippr 10 alice", HANDLE, "reddit")
            .await
            .unwrap();
        assert_eq!(cmd.command, CommandKind::Reward);
        assert_eq!(cmd.transfers.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_parsing_is_idempotent() {
        let parser = parser();
        let text = "nice 2,5 EUR u/arktippr";
        let first = parser.parse_mention(text, HANDLE, "reddit").await;
        let second = parser.parse_mention(text, HANDLE, "reddit").await;
        assert!(first.is_ok());
        assert_eq!(first, second);
    }
}
