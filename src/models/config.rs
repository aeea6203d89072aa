//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration, read from `config.toml` (or a `.json` file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Inclusion criteria for competitions
    pub filters: FilterConfig,

    /// Listing API client settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Override for the history file location
    #[serde(default)]
    pub history_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML or JSON file, chosen by extension.
    ///
    /// A missing or malformed file is a configuration error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read config file {}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content).map_err(|e| {
                AppError::config(format!("invalid JSON in {}: {e}", path.display()))
            })
        } else {
            toml::from_str(&content).map_err(|e| {
                AppError::config(format!("invalid TOML in {}: {e}", path.display()))
            })
        }
    }

    /// Resolve the history file path relative to the data directory.
    pub fn history_path(&self, data_dir: &Path) -> PathBuf {
        match &self.history_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(defaults::HISTORY_FILE),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.base_url.trim().is_empty() {
            return Err(AppError::validation("source.base_url is empty"));
        }
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.timeout_secs == Some(0) {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if let Some(categories) = &self.filters.category {
            if categories.iter().any(|c| c.trim().is_empty()) {
                return Err(AppError::validation("filters.category contains an empty name"));
            }
        }
        Ok(())
    }
}

/// Inclusion criteria. Unset fields mean "unrestricted".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterConfig {
    /// Allowed categories; absent or empty means any category
    #[serde(default)]
    pub category: Option<Vec<String>>,

    /// Only keep competitions tagged "tabular"
    #[serde(default)]
    pub table_only: Option<bool>,
}

impl FilterConfig {
    /// The category allow-list, if one restricts the output.
    pub fn allow_list(&self) -> Option<&[String]> {
        self.category.as_deref().filter(|list| !list.is_empty())
    }

    /// Whether only tabular competitions pass.
    pub fn tabular_only(&self) -> bool {
        self.table_only.unwrap_or(false)
    }
}

/// Listing API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the listing API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Optional request timeout in seconds; unset leaves the client default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

mod defaults {
    pub const HISTORY_FILE: &str = "sent_competitions.json";

    pub fn base_url() -> String {
        "https://www.kaggle.com/api/v1".to_string()
    }

    pub fn user_agent() -> String {
        format!("compwatch/{}", env!("CARGO_PKG_VERSION"))
    }
}
