// src/pipeline/filter.rs

//! Competition filtering against configured criteria and the history.

use std::collections::HashSet;

use crate::models::{CompetitionRecord, FilterConfig};

/// Keep records that pass every criterion, in input order.
///
/// A record passes when its category is allowed (or no allow-list is set),
/// its title has not been notified before, and it is tagged tabular whenever
/// `table_only` is on.
pub fn apply(
    records: &[CompetitionRecord],
    config: &FilterConfig,
    seen: &HashSet<String>,
) -> Vec<CompetitionRecord> {
    records
        .iter()
        .filter(|record| matches(record, config, seen))
        .cloned()
        .collect()
}

/// Check a single record against the criteria.
pub fn matches(record: &CompetitionRecord, config: &FilterConfig, seen: &HashSet<String>) -> bool {
    if let Some(allowed) = config.allow_list() {
        if !allowed.iter().any(|c| c == &record.category) {
            return false;
        }
    }

    if seen.contains(&record.title) {
        return false;
    }

    !config.tabular_only() || record.is_tabular()
}
