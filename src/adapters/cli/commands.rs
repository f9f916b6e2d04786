//! CLI Command Handlers
//!
//! Implementation of all CLI commands for the tipbot parser.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::rates::{CoinGeckoClient, FixedRateTable};
use crate::adapters::users::{AllowListDirectory, RedditUserClient};
use crate::config::{load_config, Config};
use crate::domain::currency::CurrencyBook;
use crate::domain::error::ParseFailure;
use crate::parser::{ParserConfig, TipParser};
use crate::ports::{ExchangeRatePort, UserDirectoryPort};

/// Default configuration file location
const DEFAULT_CONFIG: &str = "config/tipbot.toml";

/// Environment variable overriding the configuration file location
const CONFIG_ENV: &str = "TIPBOT_CONFIG";

/// Tipbot Parser - Mention and command parsing for a custodial ARK tipping bot
#[derive(Parser, Debug)]
#[command(
    name = "tipbot-parser",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Parse tipping-bot mentions and direct-message commands",
    long_about = "Turns social-media mentions (\"10 USD u/arktippr\") and direct-message \
                  commands (\"SEND alice 10\") into validated transfer commands, printed as JSON."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (default: $TIPBOT_CONFIG or config/tipbot.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Use live CoinGecko prices and Reddit user lookups
    #[arg(long, global = true)]
    pub online: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a public post that mentions the bot
    Mention(MentionCmd),

    /// Parse a direct-message keyword with its arguments
    Command(CommandCmd),

    /// Parse a whole direct message
    Message(MessageCmd),

    /// Resolve one or two tokens into an amount and currency
    Resolve(ResolveCmd),
}

/// Parse a mention
#[derive(Parser, Debug)]
pub struct MentionCmd {
    /// Full post text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Platform of the post (defaults to the configured platform)
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Bot handle to look for (defaults to the configured handle)
    #[arg(long, value_name = "HANDLE")]
    pub handle: Option<String>,
}

/// Parse an explicit command
#[derive(Parser, Debug)]
pub struct CommandCmd {
    /// Command keyword (SEND, WITHDRAW, STICKERS, DEPOSIT, BALANCE, HELP)
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Argument tokens following the keyword
    #[arg(value_name = "ARGS", trailing_var_arg = true)]
    pub args: Vec<String>,

    /// Platform of the sender (defaults to the configured platform)
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<String>,
}

/// Parse a direct message
#[derive(Parser, Debug)]
pub struct MessageCmd {
    /// Full message text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Platform of the sender (defaults to the configured platform)
    #[arg(short, long, value_name = "PLATFORM")]
    pub platform: Option<String>,
}

/// Resolve an amount
#[derive(Parser, Debug)]
pub struct ResolveCmd {
    /// Token further from the anchor (or the only token)
    #[arg(value_name = "LEFT")]
    pub left: String,

    /// Token adjacent to the anchor
    #[arg(value_name = "RIGHT")]
    pub right: Option<String>,
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    // Initialize logging based on flags
    init_logging(app.verbose, app.debug)?;

    let config_path = resolve_config_path(app.config);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    let parser = build_parser(&config, app.online)?;

    match app.command {
        Command::Mention(cmd) => mention_command(&parser, &config, cmd).await,
        Command::Command(cmd) => command_command(&parser, &config, cmd).await,
        Command::Message(cmd) => message_command(&parser, &config, cmd).await,
        Command::Resolve(cmd) => resolve_command(&parser, cmd).await,
    }
}

/// Initialize logging system
fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// CLI flag, then $TIPBOT_CONFIG, then the default path; `~` is expanded
fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    let raw = flag
        .map(|p| p.to_string_lossy().into_owned())
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

/// Wire the parser to offline or online collaborators
fn build_parser(config: &Config, online: bool) -> Result<TipParser> {
    let currencies = CurrencyBook::from(config);

    let (rates, users): (Arc<dyn ExchangeRatePort>, Arc<dyn UserDirectoryPort>) = if online {
        tracing::info!("Using CoinGecko prices and Reddit user lookups");
        (
            Arc::new(CoinGeckoClient::new(currencies).context("Failed to create CoinGecko client")?),
            Arc::new(RedditUserClient::new().context("Failed to create Reddit client")?),
        )
    } else {
        let directory = AllowListDirectory::new(&config.users.platforms);
        if directory.user_count() == 0 {
            tracing::warn!("No [users] configured - every username will be rejected");
        }
        (
            Arc::new(FixedRateTable::new(currencies, &config.rates)),
            Arc::new(directory),
        )
    };

    Ok(TipParser::new(ParserConfig::from(config), rates, users))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_outcome<T: Serialize>(outcome: Result<T, ParseFailure>) -> Result<()> {
    match outcome {
        Ok(value) => print_json(&value),
        Err(ParseFailure::EmptyReward { skipped }) => print_json(&serde_json::json!({
            "error": "Reward produced no transfers",
            "skipped": skipped,
        })),
        Err(failure) => print_json(&serde_json::json!({ "error": failure.to_string() })),
    }
}

/// Handle mention command
async fn mention_command(parser: &TipParser, config: &Config, cmd: MentionCmd) -> Result<()> {
    let handle = cmd.handle.unwrap_or_else(|| config.bot.handle.clone());
    let platform = cmd.platform.unwrap_or_else(|| config.bot.platform.clone());
    tracing::info!("Parsing mention of {} on {}", handle, platform);

    print_outcome(parser.parse_mention(&cmd.text, &handle, &platform).await)
}

/// Handle explicit command
async fn command_command(parser: &TipParser, config: &Config, cmd: CommandCmd) -> Result<()> {
    let platform = cmd.platform.unwrap_or_else(|| config.bot.platform.clone());
    print_outcome(parser.parse_command(&cmd.keyword, &cmd.args, &platform).await)
}

/// Handle direct message
async fn message_command(parser: &TipParser, config: &Config, cmd: MessageCmd) -> Result<()> {
    let platform = cmd.platform.unwrap_or_else(|| config.bot.platform.clone());
    print_outcome(parser.parse_message(&cmd.text, &platform).await)
}

/// Handle resolve command
async fn resolve_command(parser: &TipParser, cmd: ResolveCmd) -> Result<()> {
    let resolved = parser.resolve(Some(&cmd.left), cmd.right.as_deref()).await;
    print_json(&resolved)
}
