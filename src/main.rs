//! Tipbot Parser CLI
//!
//! Parses tipping-bot mentions and direct messages from the command line.

use anyhow::Result;
use tipbot_parser::adapters::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (TIPBOT_CONFIG, RUST_LOG)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
