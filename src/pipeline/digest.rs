// src/pipeline/digest.rs

//! Digest email formatting.

use crate::models::CompetitionRecord;

/// Subject line of every digest.
pub const DIGEST_SUBJECT: &str = "New Kaggle Competitions Found!";

/// Render records as digest blocks separated by a blank line.
pub fn format_digest(records: &[CompetitionRecord]) -> String {
    records
        .iter()
        .map(CompetitionRecord::digest_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, category: &str, reward: &str, deadline: &str) -> CompetitionRecord {
        CompetitionRecord {
            title: title.to_string(),
            deadline: deadline.to_string(),
            category: category.to_string(),
            reward: reward.to_string(),
            team_count: 10,
            user_has_entered: false,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_format_digest() {
        let records = vec![
            record("A", "Featured", "$50,000", "2030-01-01 00:00:00"),
            record("B", "Playground", "Swag", "2030-02-01 12:30:00"),
        ];
        assert_eq!(
            format_digest(&records),
            "A (Featured)\nReward: $50,000\nDeadline: 2030-01-01 00:00:00\n\n\
             B (Playground)\nReward: Swag\nDeadline: 2030-02-01 12:30:00"
        );
    }

    #[test]
    fn test_format_single_and_empty() {
        let records = vec![record("Only", "Research", "Knowledge", "soon")];
        assert_eq!(
            format_digest(&records),
            "Only (Research)\nReward: Knowledge\nDeadline: soon"
        );
        assert_eq!(format_digest(&[]), "");
    }
}
