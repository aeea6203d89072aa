// src/services/mailer.rs

//! SMTP delivery of the digest email.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::{AppError, Result};
use crate::models::SmtpSettings;
use crate::services::Notifier;

const SERVICE: &str = "SMTP";

const MISSING_CREDENTIALS: &str = "SMTP_USER and SMTP_PASS must be set (environment or .env file).\n\
    For Gmail:\n\
    1. Enable 2-step verification on the account\n\
    2. Create an App Password at https://myaccount.google.com/apppasswords\n\
    3. Set SMTP_USER=your-address@gmail.com and SMTP_PASS=<app password>";

const REJECTED_CREDENTIALS: &str = "If using Gmail:\n\
    1. Make sure 2-step verification is enabled\n\
    2. Use an App Password, not the account password\n\
    3. Create one at https://myaccount.google.com/apppasswords\n\
    4. Set SMTP_PASS to the 16-character app password without spaces";

/// Mails the digest through an authenticated STARTTLS session.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    /// User and password, or a configuration error when either is unset.
    fn credentials(&self) -> Result<(&str, &str)> {
        match (&self.settings.user, &self.settings.password) {
            (Some(user), Some(password)) => Ok((user.as_str(), password.as_str())),
            _ => Err(AppError::config(MISSING_CREDENTIALS)),
        }
    }

    /// Build the plain-text message with Subject/From/To headers.
    fn build_message(&self, from: &str, subject: &str, body: &str) -> Result<Message> {
        let from: Mailbox = parse_mailbox("sender", from)?;
        let to: Mailbox = parse_mailbox("recipient", &self.settings.recipient)?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::transport(format!("cannot build message: {e}")))
    }
}

#[async_trait]
impl Notifier for SmtpMailer {
    async fn send(&self, subject: &str, body: &str) -> Result<()> {
        let (user, password) = self.credentials()?;
        let message = self.build_message(user, subject, body)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.server)
            .map_err(classify_smtp_error)?
            .port(self.settings.port)
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        log::info!(
            "Sending digest to {} via {}:{}",
            self.settings.recipient,
            self.settings.server,
            self.settings.port
        );
        transport.send(message).await.map_err(classify_smtp_error)?;
        Ok(())
    }
}

fn parse_mailbox(role: &str, address: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse()
        .map_err(|e| AppError::transport(format!("invalid {role} address {address:?}: {e}")))
}

/// Whether an SMTP reply code means the server refused our credentials.
fn is_auth_rejection(code: &str) -> bool {
    matches!(code, "530" | "534" | "535")
}

fn classify_smtp_error(err: lettre::transport::smtp::Error) -> AppError {
    let rejected = err
        .status()
        .is_some_and(|code| is_auth_rejection(&code.to_string()));

    if rejected {
        AppError::auth(SERVICE, format!("{err}\n\n{REJECTED_CREDENTIALS}"))
    } else {
        AppError::transport(format!("failed to send email: {err}"))
    }
}
