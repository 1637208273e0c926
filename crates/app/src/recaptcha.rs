//! reCAPTCHA site verification client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use storefront::verification::{RejectionReason, SiteVerification, Verdict, assess};
use thiserror::Error;
use tracing::{info, warn};

/// Default siteverify endpoint.
pub const DEFAULT_RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Configuration for the verification provider.
#[derive(Clone)]
pub struct RecaptchaConfig {
    /// Siteverify endpoint.
    pub verify_url: String,

    /// Shared secret.
    pub secret: String,

    /// Minimum trust score treated as human.
    pub min_score: f64,
}

impl std::fmt::Debug for RecaptchaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecaptchaConfig")
            .field("verify_url", &self.verify_url)
            .field("secret", &"**redacted**")
            .field("min_score", &self.min_score)
            .finish()
    }
}

/// Errors that prevent a verification verdict from being reached.
#[derive(Debug, Error)]
pub enum BotVerificationError {
    #[error("verification token is missing")]
    MissingToken,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from verification provider: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait BotVerifier: Send + Sync {
    /// Verify a client-side challenge token. Transport failures are errors;
    /// provider rejections and low scores are [`Verdict::Rejected`].
    async fn verify(&self, token: &str) -> Result<Verdict, BotVerificationError>;
}

/// HTTP client for the reCAPTCHA siteverify API.
#[derive(Debug, Clone)]
pub struct RecaptchaClient {
    config: RecaptchaConfig,
    http: Client,
}

impl RecaptchaClient {
    #[must_use]
    pub fn new(config: RecaptchaConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

fn log_verdict(verdict: &Verdict) {
    match verdict {
        Verdict::Human { score } => info!(score, "bot verification passed"),
        Verdict::Rejected(RejectionReason::ProviderFailure { error_codes }) => {
            warn!(?error_codes, "bot verification failed at provider");
        }
        Verdict::Rejected(RejectionReason::LowScore { score, threshold }) => {
            warn!(?score, threshold, "bot verification score below threshold");
        }
    }
}

#[async_trait]
impl BotVerifier for RecaptchaClient {
    async fn verify(&self, token: &str) -> Result<Verdict, BotVerificationError> {
        if token.trim().is_empty() {
            return Err(BotVerificationError::MissingToken);
        }

        let response = self
            .http
            .post(&self.config.verify_url)
            .form(&[("secret", self.config.secret.as_str()), ("response", token)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(BotVerificationError::UnexpectedResponse(format!(
                "siteverify failed with status {status}: {text}"
            )));
        }

        let verification: SiteVerification = response.json().await?;
        let verdict = assess(&verification, self.config.min_score);

        log_verdict(&verdict);

        Ok(verdict)
    }
}
