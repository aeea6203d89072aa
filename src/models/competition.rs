//! Competition record data structure.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Tag that marks a competition as tabular.
pub const TABULAR_TAG: &str = "tabular";

/// A competition fetched from the listing API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetitionRecord {
    /// Competition title, the identity key across runs
    pub title: String,

    /// Submission deadline, rendered as `YYYY-MM-DD HH:MM:SS` when parseable
    pub deadline: String,

    /// Competition category (e.g. "Featured", "Playground")
    pub category: String,

    /// Free-form reward ("$25,000", "Knowledge", "Swag")
    pub reward: String,

    /// Number of teams entered
    pub team_count: u64,

    /// Whether the authenticated user has entered
    pub user_has_entered: bool,

    /// Tag names in upstream order
    pub tags: Vec<String>,
}

impl CompetitionRecord {
    /// Check whether the record carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check whether the record is tagged as tabular.
    pub fn is_tabular(&self) -> bool {
        self.has_tag(TABULAR_TAG)
    }

    /// Render the record as one digest block.
    pub fn digest_block(&self) -> String {
        format!(
            "{} ({})\nReward: {}\nDeadline: {}",
            self.title, self.category, self.reward, self.deadline
        )
    }
}

/// Normalize an upstream deadline timestamp for display.
///
/// RFC 3339 and naive ISO 8601 timestamps become `YYYY-MM-DD HH:MM:SS`;
/// anything else is returned unchanged.
pub fn display_deadline(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CompetitionRecord {
        CompetitionRecord {
            title: "Playground Series S5E1".to_string(),
            deadline: "2025-01-31 23:59:00".to_string(),
            category: "Playground".to_string(),
            reward: "Swag".to_string(),
            team_count: 1200,
            user_has_entered: false,
            tags: vec!["tabular".to_string(), "regression".to_string()],
        }
    }

    #[test]
    fn test_digest_block() {
        let record = sample_record();
        assert_eq!(
            record.digest_block(),
            "Playground Series S5E1 (Playground)\nReward: Swag\nDeadline: 2025-01-31 23:59:00"
        );
    }

    #[test]
    fn test_tags() {
        let mut record = sample_record();
        assert!(record.is_tabular());
        assert!(record.has_tag("regression"));

        record.tags.clear();
        assert!(!record.is_tabular());
    }

    #[test]
    fn test_display_deadline() {
        assert_eq!(
            display_deadline("2025-01-31T23:59:00Z"),
            "2025-01-31 23:59:00"
        );
        assert_eq!(
            display_deadline("2025-01-31T23:59:00.000"),
            "2025-01-31 23:59:00"
        );
        assert_eq!(display_deadline("whenever"), "whenever");
        assert_eq!(display_deadline(""), "");
    }
}
