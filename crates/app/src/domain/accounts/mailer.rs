//! Outbound mail

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail transport unavailable: {0}")]
    Unavailable(String),
}

/// Greeting sent after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeEmail {
    pub to: String,
    pub full_name: String,
}

impl WelcomeEmail {
    #[must_use]
    pub fn subject(&self) -> String {
        format!("Welcome, {}!", self.full_name)
    }
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), MailerError>;
}

/// Mailer that records deliveries in the log instead of sending them.
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    #[must_use]
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), MailerError> {
        info!(
            from = %self.from,
            to = %email.to,
            subject = %email.subject(),
            "welcome email delivered"
        );

        Ok(())
    }
}
