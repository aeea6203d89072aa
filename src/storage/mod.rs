//! Storage abstractions for the notification history.
//!
//! The history is the set of competition titles that have already been
//! emailed. It is read once at the start of a run and rewritten in full after
//! a successful send:
//!
//! ```text
//! {data_dir}/
//! ├── config.toml              # Filters and source settings
//! └── sent_competitions.json   # {"sent_titles": [...]}
//! ```

pub mod local;

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// Re-export for convenience
pub use local::LocalHistory;

/// On-disk shape of the history file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryFile {
    /// Titles already notified, sorted for stable output
    #[serde(default)]
    pub sent_titles: Vec<String>,
}

impl HistoryFile {
    /// Build the file contents from a title set.
    pub fn from_titles(titles: &HashSet<String>) -> Self {
        let mut sent_titles: Vec<String> = titles.iter().cloned().collect();
        sent_titles.sort();
        Self { sent_titles }
    }

    /// Consume the file contents into a title set.
    pub fn into_titles(self) -> HashSet<String> {
        self.sent_titles.into_iter().collect()
    }
}

/// Trait for history storage backends.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load previously notified titles. Missing history is an empty set.
    async fn load(&self) -> Result<HashSet<String>>;

    /// Replace the stored history with `titles`.
    async fn save(&self, titles: &HashSet<String>) -> Result<()>;
}
