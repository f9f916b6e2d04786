//! User directory port
//!
//! Answers whether a username exists on a platform.

use async_trait::async_trait;
use thiserror::Error;

/// User lookup error type
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status} looking up {username}")]
    UnexpectedStatus { status: u16, username: String },
}

/// User directory port trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryPort: Send + Sync {
    /// True if `username` is an existing account on `platform`
    async fn is_existing_user(&self, username: &str, platform: &str)
        -> Result<bool, DirectoryError>;
}
