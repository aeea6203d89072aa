//! Local filesystem history store.
//!
//! Keeps the history as a single pretty-printed JSON file. Writes go to a
//! temporary sibling first and are renamed into place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{HistoryFile, HistoryStore};

/// JSON-file history backend.
#[derive(Debug, Clone)]
pub struct LocalHistory {
    path: PathBuf,
}

impl LocalHistory {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl HistoryStore for LocalHistory {
    async fn load(&self) -> Result<HashSet<String>> {
        let Some(bytes) = self.read_bytes().await? else {
            log::info!("No history at {}, starting fresh", self.path.display());
            return Ok(HashSet::new());
        };

        let file: HistoryFile = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::parse(self.path.display().to_string(), e))?;

        let titles = file.into_titles();
        log::debug!(
            "Loaded {} notified titles from {}",
            titles.len(),
            self.path.display()
        );
        Ok(titles)
    }

    async fn save(&self, titles: &HashSet<String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&HistoryFile::from_titles(titles))?;
        self.write_bytes(&bytes).await?;
        log::info!(
            "History: {} titles written to {}",
            titles.len(),
            self.path.display()
        );
        Ok(())
    }
}
