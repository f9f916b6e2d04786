use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::ports::{DirectoryError, UserDirectoryPort};

const REDDIT_API: &str = "https://www.reddit.com";
const USER_AGENT: &str = concat!("tipbot-parser/", env!("CARGO_PKG_VERSION"));

/// Reddit usernames: 3-20 of `A-Z a-z 0-9 _ -`
fn is_reddit_username(username: &str) -> bool {
    (3..=20).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Checks Reddit accounts through the public `about.json` endpoint
#[derive(Debug, Clone)]
pub struct RedditUserClient {
    http: Client,
    api_url: String,
}

impl RedditUserClient {
    pub fn new() -> Result<Self, DirectoryError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            api_url: REDDIT_API.to_string(),
        })
    }

    /// Point the client at another API root (tests, proxies)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    fn about_url(&self, username: &str) -> String {
        format!("{}/user/{}/about.json", self.api_url, username)
    }
}

#[async_trait]
impl UserDirectoryPort for RedditUserClient {
    async fn is_existing_user(&self, username: &str, platform: &str) -> Result<bool, DirectoryError> {
        if !platform.eq_ignore_ascii_case("reddit") {
            return Err(DirectoryError::UnsupportedPlatform(platform.to_string()));
        }

        // Anything else cannot exist and must not reach the URL path
        if !is_reddit_username(username) {
            tracing::debug!("Rejecting malformed Reddit username {:?}", username);
            return Ok(false);
        }

        let status = self.http.get(self.about_url(username)).send().await?.status();
        match status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(DirectoryError::UnexpectedStatus {
                status: other.as_u16(),
                username: username.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(RedditUserClient::new().is_ok());
    }

    #[test]
    fn test_about_url() {
        let client = RedditUserClient::new().unwrap().with_api_url("http://localhost:8080/");
        assert_eq!(client.about_url("alice"), "http://localhost:8080/user/alice/about.json");
    }

    #[test]
    fn test_reddit_username_charset() {
        assert!(is_reddit_username("alice"));
        assert!(is_reddit_username("Some_User-42"));
        assert!(!is_reddit_username("ab"));
        assert!(!is_reddit_username("a_name_far_too_long_here"));
        assert!(!is_reddit_username("alice?x=1"));
        assert!(!is_reddit_username("alice#top"));
        assert!(!is_reddit_username("../admin"));
    }

    #[tokio::test]
    async fn test_malformed_username_skips_http() {
        // Unroutable API root: any HTTP call would fail
        let client = RedditUserClient::new().unwrap().with_api_url("http://127.0.0.1:9");
        for name in ["alice?x=1", "bob/../carol", "dave#x"] {
            assert!(!client.is_existing_user(name, "reddit").await.unwrap(), "{name}");
        }
    }

    #[tokio::test]
    async fn test_other_platforms_unsupported() {
        let client = RedditUserClient::new().unwrap();
        let result = client.is_existing_user("alice", "twitter").await;
        assert!(matches!(result, Err(DirectoryError::UnsupportedPlatform(_))));
    }
}
