//! Pipeline entry points.
//!
//! - `filter`: select new competitions matching the configured criteria
//! - `digest`: render matches as the email body
//! - `run_pipeline`: one full notification cycle

pub mod digest;
pub mod filter;
pub mod run;

pub use digest::{DIGEST_SUBJECT, format_digest};
pub use run::{RunOptions, RunOutcome, run_pipeline};
