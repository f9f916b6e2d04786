//! Reward-List Builder
//!
//! Walks the tokens after a `REWARD u/bot` mention and pairs every valid
//! recipient with the amount or STICKERS marker written before it:
//!
//! `REWARD u/bot 10 alice 20USD bob STICKERS carol`
//!
//! Reserved words (amounts, keywords, currencies) are passed over silently.
//! Anything else that does not turn into a transfer is reported in
//! `RewardList::skipped` so callers can tell dropped entries from filler.

use crate::domain::amount::parse_amount_currency;
use crate::domain::command::{Recipient, Transfer, STICKERS_KEYWORD};
use crate::domain::error::{ParseFailure, SkipReason, SkippedCandidate};
use crate::domain::username::is_reserved_username;

use super::tokenizer::{tokenize, tokenize_preserving};
use super::TipParser;

/// Transfers of a reward batch plus the candidates that were dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardList {
    /// Emitted transfers, in text order
    pub transfers: Vec<Transfer>,
    /// Recipient-like tokens that produced no transfer
    pub skipped: Vec<SkippedCandidate>,
}

impl TipParser {
    /// Build the transfers of a REWARD mention
    ///
    /// `mention_index` is the bot mention's token index in `body`. Fails with
    /// `EmptyReward` when no transfer could be built.
    pub async fn build_reward(
        &self,
        body: &str,
        mention_index: usize,
        platform: &str,
    ) -> Result<RewardList, ParseFailure> {
        let upper = tokenize(body);
        let original = tokenize_preserving(body);

        let mut transfers = Vec::new();
        let mut skipped = Vec::new();

        for index in (mention_index + 1)..original.len() {
            let raw = &original[index];
            // Amounts such as "20USD" or "$5" price the next recipient
            if parse_amount_currency(raw, &self.config.currencies).is_some() {
                continue;
            }

            let candidate = self.parse_username(raw, platform);
            if is_reserved_username(&candidate.username, &self.config.currencies) {
                continue;
            }

            if !self.is_valid_user(&candidate).await {
                tracing::debug!("Skipping reward candidate {}: unknown user", raw);
                skipped.push(SkippedCandidate::new(raw.clone(), SkipReason::UnknownUser));
                continue;
            }

            // Tokens at or before the mention never price a recipient
            let right = (index - 1 > mention_index).then(|| upper[index - 1].as_str());
            let left = (index >= 2 && index - 2 > mention_index).then(|| upper[index - 2].as_str());

            let transfer = match right {
                Some(STICKERS_KEYWORD) => Some(Transfer::stickers(Recipient::User(candidate))),
                Some(_) => self
                    .resolve_before_anchor(left, right)
                    .await
                    .filter(|ac| ac.has_value())
                    .map(|ac| Transfer::tip(Recipient::User(candidate), ac)),
                None => None,
            };

            match transfer {
                Some(transfer) => transfers.push(transfer),
                None => {
                    tracing::debug!("Skipping reward candidate {}: no amount", raw);
                    skipped.push(SkippedCandidate::new(raw.clone(), SkipReason::NoAmount));
                }
            }
        }

        if transfers.is_empty() {
            return Err(ParseFailure::EmptyReward { skipped });
        }

        Ok(RewardList { transfers, skipped })
    }
}
