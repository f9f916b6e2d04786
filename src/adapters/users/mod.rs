//! User Directory Adapters
//!
//! - `AllowListDirectory`: offline allow-lists from the config file
//! - `RedditUserClient`: live Reddit account lookups

mod allow_list;
mod reddit;

pub use allow_list::AllowListDirectory;
pub use reddit::RedditUserClient;
