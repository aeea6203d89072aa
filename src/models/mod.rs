// src/models/mod.rs

//! Domain models for the competition watcher.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod competition;
mod config;
mod settings;

// Re-export all public types
pub use competition::{CompetitionRecord, TABULAR_TAG, display_deadline};
pub use config::{Config, FilterConfig, SourceConfig};
pub use settings::{KaggleCredentials, Settings, SmtpSettings};
