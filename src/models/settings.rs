//! Environment-sourced settings, resolved once at startup.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Everything the run needs from the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub smtp: SmtpSettings,
    pub kaggle: Option<KaggleCredentials>,
}

impl Settings {
    /// Resolve settings from the process environment and `~/.kaggle`.
    pub fn from_env() -> Result<Self> {
        let home_kaggle = dirs::home_dir().map(|home| home.join(".kaggle"));
        Self::from_lookup(|key| env::var(key).ok(), home_kaggle.as_deref())
    }

    /// Resolve settings through an arbitrary variable lookup.
    ///
    /// `default_kaggle_dir` is consulted for `kaggle.json` when neither the
    /// Kaggle variables nor `KAGGLE_CONFIG_DIR` provide credentials.
    pub fn from_lookup<F>(lookup: F, default_kaggle_dir: Option<&Path>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let smtp = SmtpSettings::from_lookup(&lookup)?;
        let kaggle = KaggleCredentials::resolve(&lookup, default_kaggle_dir)?;
        Ok(Self { smtp, kaggle })
    }
}

/// Outbound mail settings. Credentials stay optional here; the mailer checks
/// them right before sending.
#[derive(Clone)]
pub struct SmtpSettings {
    pub user: Option<String>,
    pub password: Option<String>,
    pub server: String,
    pub port: u16,
    pub recipient: String,
}

impl SmtpSettings {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match non_empty("SMTP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::config(format!("SMTP_PORT must be a port number, got {raw:?}: {e}"))
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            user: non_empty("SMTP_USER"),
            password: non_empty("SMTP_PASS"),
            server: non_empty("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
            port,
            recipient: lookup("EMAIL").unwrap_or_default(),
        })
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("server", &self.server)
            .field("port", &self.port)
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Kaggle API credentials (`kaggle.json` layout).
#[derive(Clone, Deserialize)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

impl KaggleCredentials {
    /// Resolve credentials by the Kaggle convention:
    /// `KAGGLE_USERNAME`/`KAGGLE_KEY`, then `$KAGGLE_CONFIG_DIR/kaggle.json`,
    /// then `kaggle.json` in `default_dir`.
    ///
    /// Returns `Ok(None)` when nothing is configured. A credentials file that
    /// exists but cannot be parsed is a configuration error.
    pub fn resolve<F>(lookup: F, default_dir: Option<&Path>) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup("KAGGLE_USERNAME").filter(|v| !v.is_empty());
        let key = lookup("KAGGLE_KEY").filter(|v| !v.is_empty());
        if let (Some(username), Some(key)) = (username, key) {
            return Ok(Some(Self { username, key }));
        }

        let dir = lookup("KAGGLE_CONFIG_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| default_dir.map(Path::to_path_buf));

        match dir {
            Some(dir) => Self::load_file(&dir.join("kaggle.json")),
            None => Ok(None),
        }
    }

    fn load_file(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };

        let creds: Self = serde_json::from_str(&content).map_err(|e| {
            AppError::config(format!("invalid Kaggle credentials in {}: {e}", path.display()))
        })?;
        log::debug!("Loaded Kaggle credentials from {}", path.display());
        Ok(Some(creds))
    }
}

impl fmt::Debug for KaggleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KaggleCredentials")
            .field("username", &self.username)
            .field("key", &"***")
            .finish()
    }
}
