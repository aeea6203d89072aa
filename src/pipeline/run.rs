// src/pipeline/run.rs

//! Notification pipeline: history → fetch → filter → send → persist.

use chrono::Utc;

use crate::error::Result;
use crate::models::FilterConfig;
use crate::pipeline::digest::{DIGEST_SUBJECT, format_digest};
use crate::pipeline::filter;
use crate::services::{ListingSource, Notifier};
use crate::storage::HistoryStore;

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Build the digest but neither send it nor touch the history
    pub dry_run: bool,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing passed the filters; history left as it was
    NothingNew { fetched: usize },
    /// Digest sent and history updated
    Notified {
        fetched: usize,
        titles: Vec<String>,
        history_size: usize,
    },
    /// Digest built but not sent
    DryRun {
        fetched: usize,
        titles: Vec<String>,
        digest: String,
    },
}

impl RunOutcome {
    /// Number of competitions included in the digest.
    pub fn matched_count(&self) -> usize {
        match self {
            Self::NothingNew { .. } => 0,
            Self::Notified { titles, .. } | Self::DryRun { titles, .. } => titles.len(),
        }
    }
}

/// Run one notification cycle.
///
/// A title only enters the history after the digest containing it was sent.
/// Any error aborts the run with the history untouched.
pub async fn run_pipeline(
    filters: &FilterConfig,
    history: &dyn HistoryStore,
    source: &dyn ListingSource,
    notifier: &dyn Notifier,
    options: RunOptions,
) -> Result<RunOutcome> {
    let start_time = Utc::now();

    log::info!("Step 1/4: Loading history...");
    let mut seen = history.load().await?;
    log::info!("{} competitions already notified", seen.len());

    log::info!("Step 2/4: Fetching competitions...");
    let records = source.fetch_all().await?;
    let fetched = records.len();

    log::info!("Step 3/4: Filtering {} competitions...", fetched);
    let matched = filter::apply(&records, filters, &seen);

    if matched.is_empty() {
        log::info!("No new competitions found.");
        return Ok(RunOutcome::NothingNew { fetched });
    }

    let digest = format_digest(&matched);
    let titles: Vec<String> = matched.into_iter().map(|r| r.title).collect();

    if options.dry_run {
        log::info!(
            "Dry run: {} new competition(s), digest not sent:\n{}",
            titles.len(),
            digest
        );
        return Ok(RunOutcome::DryRun {
            fetched,
            titles,
            digest,
        });
    }

    log::info!("Step 4/4: Sending digest for {} competition(s)...", titles.len());
    notifier.send(DIGEST_SUBJECT, &digest).await?;

    seen.extend(titles.iter().cloned());
    history.save(&seen).await?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Sent notification for {} competition(s) in {} ms.",
        titles.len(),
        elapsed.num_milliseconds()
    );

    Ok(RunOutcome::Notified {
        fetched,
        titles,
        history_size: seen.len(),
    })
}
