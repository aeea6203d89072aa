//! External collaborators: the competition listing API and the mail server.

pub mod kaggle;
pub mod mailer;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CompetitionRecord;

pub use kaggle::{KaggleClient, MAX_PAGES};
pub use mailer::SmtpMailer;

/// Source of competition listings.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch every record in the listing window, in page order.
    async fn fetch_all(&self) -> Result<Vec<CompetitionRecord>>;
}

/// Delivery channel for the digest.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one message. Not retried.
    async fn send(&self, subject: &str, body: &str) -> Result<()>;
}
