//! Explicit-Command Parser
//!
//! Direct-message commands with positional arguments:
//!
//! ```text
//! SEND <user> <amount> [currency]
//! WITHDRAW <address> [amount] [currency]
//! STICKERS <user>
//! DEPOSIT [token]
//! BALANCE [token]
//! HELP
//! ```
//!
//! A recognized command whose arguments are missing or unusable degrades
//! to a help-only `Command`; it never carries a partial transfer.

use crate::domain::address::{address_token, validate_address};
use crate::domain::amount::AmountCurrency;
use crate::domain::command::{Command, CommandKind, Recipient, Transfer};
use crate::domain::error::ParseFailure;

use super::tokenizer::tokenize_preserving;
use super::TipParser;

/// Positional arguments after the keyword
///
/// The keyword is found case-insensitively, also when wrapped in
/// punctuation ("!send"). When it is absent every token is an argument.
fn positional_args<'a>(keyword: &str, args: &'a [String]) -> Vec<&'a str> {
    let start = args
        .iter()
        .position(|a| is_keyword_token(a, keyword))
        .map_or(0, |i| i + 1);

    args.get(start..)
        .unwrap_or_default()
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect()
}

fn is_keyword_token(token: &str, keyword: &str) -> bool {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .eq_ignore_ascii_case(keyword)
}

impl TipParser {
    /// Parse a direct-message command keyword and its argument tokens
    pub async fn parse_command(
        &self,
        command: &str,
        args: &[String],
        platform: &str,
    ) -> Result<Command, ParseFailure> {
        let keyword = command.trim().to_uppercase();
        let kind = CommandKind::from_keyword(&keyword)
            .filter(CommandKind::is_direct)
            .ok_or_else(|| ParseFailure::UnknownCommand(keyword.clone()))?;

        let positional = positional_args(&keyword, args);

        let parsed = match kind {
            CommandKind::Deposit | CommandKind::Balance => {
                Some(self.parse_token_command(kind, positional.first().copied()))
            }
            _ if positional.is_empty() => None,
            CommandKind::Send => self.parse_send(&positional, platform).await,
            CommandKind::Withdraw => self.parse_withdraw(&positional).await,
            CommandKind::Stickers => self.parse_stickers(&positional, platform).await,
            _ => None,
        };

        Ok(parsed.unwrap_or_else(|| {
            tracing::debug!("{} has no usable arguments, answering with help", kind);
            Command::help_only(kind)
        }))
    }

    /// Parse a whole direct message: the first token is the keyword
    pub async fn parse_message(&self, text: &str, platform: &str) -> Result<Command, ParseFailure> {
        let tokens = tokenize_preserving(text);
        let keyword = tokens
            .first()
            .ok_or_else(|| ParseFailure::UnknownCommand(String::new()))?;
        self.parse_command(keyword, &tokens, platform).await
    }

    async fn parse_send(&self, args: &[&str], platform: &str) -> Option<Command> {
        let user = self.parse_username(args[0], platform);
        if !self.is_valid_user(&user).await {
            return None;
        }

        let amount_currency = self
            .resolve(args.get(1).copied(), args.get(2).copied())
            .await
            .filter(AmountCurrency::has_value)?;

        let token = self.config.currencies.settlement_token(&amount_currency.currency);
        Some(
            Command::with_transfers(CommandKind::Send, vec![Transfer::send(user, amount_currency)])
                .with_token(token),
        )
    }

    async fn parse_withdraw(&self, args: &[&str]) -> Option<Command> {
        let address = args[0];
        let amount_currency = self.resolve(args.get(1).copied(), args.get(2).copied()).await;
        if amount_currency.as_ref().is_some_and(|ac| !ac.has_value()) {
            tracing::debug!("Withdraw amount rounds to zero base units");
            return None;
        }

        // An ecosystem-token amount pins the network the address must be on
        let currencies = &self.config.currencies;
        let token = match amount_currency
            .as_ref()
            .and_then(|ac| currencies.ecosystem_token(&ac.currency))
        {
            Some(token) => validate_address(address, token).ok().map(|_| token),
            None => address_token(address, currencies),
        };

        let Some(token) = token else {
            tracing::debug!("Withdraw address {} failed format validation", address);
            return None;
        };

        Some(
            Command::with_transfers(
                CommandKind::Withdraw,
                vec![Transfer::withdraw(address.to_string(), amount_currency)],
            )
            .with_token(token.code.clone()),
        )
    }

    async fn parse_stickers(&self, args: &[&str], platform: &str) -> Option<Command> {
        let user = self.parse_username(args[0], platform);
        if !self.is_valid_user(&user).await {
            return None;
        }

        Some(Command::with_transfers(
            CommandKind::Stickers,
            vec![Transfer::stickers(Recipient::User(user))],
        ))
    }

    fn parse_token_command(&self, kind: CommandKind, requested: Option<&str>) -> Command {
        let currencies = &self.config.currencies;
        let token = requested
            .and_then(|t| currencies.ecosystem_token(t))
            .map(|t| t.code.clone())
            .unwrap_or_else(|| currencies.base.clone());
        Command::help_only(kind).with_token(token)
    }
}
