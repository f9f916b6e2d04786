//! Command and Transfer Types
//!
//! The only contract between the parser and the dispatch collaborator
//! that moves funds and composes replies.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::AmountCurrency;
use super::username::Username;

/// Every keyword the bot understands, upper-case
pub const COMMAND_KEYWORDS: [&str; 8] = [
    "BALANCE", "DEPOSIT", "HELP", "REWARD", "SEND", "STICKERS", "TIP", "WITHDRAW",
];

/// Keyword preceding a reward recipient to send stickers instead of an amount
pub const STICKERS_KEYWORD: &str = "STICKERS";

/// Keyword preceding the bot mention in a reward batch
pub const REWARD_KEYWORD: &str = "REWARD";

pub fn is_command_keyword(token: &str) -> bool {
    let upper = token.trim().to_uppercase();
    COMMAND_KEYWORDS.contains(&upper.as_str())
}

/// Kind of a parsed command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandKind {
    Tip,
    Send,
    Withdraw,
    Stickers,
    Deposit,
    Balance,
    Help,
    Reward,
}

impl CommandKind {
    /// Match an upper- or lower-case keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_uppercase().as_str() {
            "TIP" => Some(CommandKind::Tip),
            "SEND" => Some(CommandKind::Send),
            "WITHDRAW" => Some(CommandKind::Withdraw),
            "STICKERS" => Some(CommandKind::Stickers),
            "DEPOSIT" => Some(CommandKind::Deposit),
            "BALANCE" => Some(CommandKind::Balance),
            "HELP" => Some(CommandKind::Help),
            "REWARD" => Some(CommandKind::Reward),
            _ => None,
        }
    }

    /// Commands accepted in a direct message
    pub fn is_direct(&self) -> bool {
        matches!(
            self,
            CommandKind::Send
                | CommandKind::Withdraw
                | CommandKind::Stickers
                | CommandKind::Deposit
                | CommandKind::Balance
                | CommandKind::Help
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Tip => "TIP",
            CommandKind::Send => "SEND",
            CommandKind::Withdraw => "WITHDRAW",
            CommandKind::Stickers => "STICKERS",
            CommandKind::Deposit => "DEPOSIT",
            CommandKind::Balance => "BALANCE",
            CommandKind::Help => "HELP",
            CommandKind::Reward => "REWARD",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a single fund movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransferKind {
    Tip,
    Send,
    Withdraw,
    Stickers,
}

/// Who receives a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Recipient {
    User(Username),
    Address(String),
    /// Author of the post the mention replies to, resolved by the dispatcher
    ParentAuthor,
}

/// A single validated fund movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub recipient: Recipient,
    pub command: TransferKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_currency: Option<AmountCurrency>,
}

impl Transfer {
    pub fn tip(recipient: Recipient, amount_currency: AmountCurrency) -> Self {
        Self {
            recipient,
            command: TransferKind::Tip,
            amount_currency: Some(amount_currency),
        }
    }

    pub fn send(user: Username, amount_currency: AmountCurrency) -> Self {
        Self {
            recipient: Recipient::User(user),
            command: TransferKind::Send,
            amount_currency: Some(amount_currency),
        }
    }

    /// A withdraw without an amount empties the wallet
    pub fn withdraw(address: String, amount_currency: Option<AmountCurrency>) -> Self {
        Self {
            recipient: Recipient::Address(address),
            command: TransferKind::Withdraw,
            amount_currency,
        }
    }

    pub fn stickers(recipient: Recipient) -> Self {
        Self {
            recipient,
            command: TransferKind::Stickers,
            amount_currency: None,
        }
    }

    pub fn is_full_balance_withdraw(&self) -> bool {
        self.command == TransferKind::Withdraw && self.amount_currency.is_none()
    }
}

/// A parsed command ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub command: CommandKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfers: Option<Vec<Transfer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_footer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Command {
    /// A recognized command without usable arguments; answered with help
    pub fn help_only(command: CommandKind) -> Self {
        Self {
            command,
            transfers: None,
            small_footer: None,
            token: None,
        }
    }

    pub fn with_transfers(command: CommandKind, transfers: Vec<Transfer>) -> Self {
        Self {
            transfers: Some(transfers),
            ..Self::help_only(command)
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_small_footer(mut self) -> Self {
        self.small_footer = Some(true);
        self
    }

    pub fn is_help_only(&self) -> bool {
        self.transfers.is_none() && self.small_footer.is_none() && self.token.is_none()
    }
}
