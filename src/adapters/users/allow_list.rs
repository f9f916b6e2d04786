//! Allow-List Directory
//!
//! Offline user directory from the `[users]` config section. Matching is
//! case-insensitive on both username and platform.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::ports::{DirectoryError, UserDirectoryPort};

#[derive(Debug, Clone, Default)]
pub struct AllowListDirectory {
    users: HashMap<String, HashSet<String>>,
}

impl AllowListDirectory {
    pub fn new(platforms: &HashMap<String, Vec<String>>) -> Self {
        let users = platforms
            .iter()
            .map(|(platform, names)| {
                (
                    platform.to_lowercase(),
                    names.iter().map(|n| n.to_lowercase()).collect(),
                )
            })
            .collect();
        Self { users }
    }

    pub fn user_count(&self) -> usize {
        self.users.values().map(HashSet::len).sum()
    }
}

#[async_trait]
impl UserDirectoryPort for AllowListDirectory {
    async fn is_existing_user(&self, username: &str, platform: &str) -> Result<bool, DirectoryError> {
        Ok(self
            .users
            .get(&platform.to_lowercase())
            .is_some_and(|names| names.contains(&username.to_lowercase())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> AllowListDirectory {
        let platforms = HashMap::from([
            ("reddit".to_string(), vec!["Alice".to_string(), "bob".to_string()]),
            ("Twitter".to_string(), vec!["carol".to_string()]),
        ]);
        AllowListDirectory::new(&platforms)
    }

    #[tokio::test]
    async fn test_known_users() {
        let directory = directory();
        assert_eq!(directory.user_count(), 3);
        assert!(directory.is_existing_user("alice", "reddit").await.unwrap());
        assert!(directory.is_existing_user("CAROL", "twitter").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_users_and_platforms() {
        let directory = directory();
        assert!(!directory.is_existing_user("carol", "reddit").await.unwrap());
        assert!(!directory.is_existing_user("alice", "mastodon").await.unwrap());
    }
}
