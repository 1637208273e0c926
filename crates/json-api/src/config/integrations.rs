//! Outbound Integration Config

use clap::Args;
use storefront::verification::TRUST_SCORE_THRESHOLD;
use storefront_app::{
    domain::payments::{self, DEFAULT_WOMPI_BASE_URL},
    identity::{DEFAULT_IDENTITY_BASE_URL, IdentityToolkitConfig},
    recaptcha::{self, DEFAULT_RECAPTCHA_VERIFY_URL},
};

const REDACTED: &str = "**redacted**";

/// reCAPTCHA site verification settings.
#[derive(Args)]
pub struct RecaptchaConfig {
    /// reCAPTCHA shared secret
    #[arg(long = "recaptcha-secret", env = "RECAPTCHA_SECRET", hide_env_values = true)]
    pub secret: String,

    /// reCAPTCHA siteverify endpoint
    #[arg(
        long = "recaptcha-verify-url",
        env = "RECAPTCHA_VERIFY_URL",
        default_value = DEFAULT_RECAPTCHA_VERIFY_URL
    )]
    pub verify_url: String,

    /// Minimum score treated as human
    #[arg(
        long = "recaptcha-min-score",
        env = "RECAPTCHA_MIN_SCORE",
        default_value_t = TRUST_SCORE_THRESHOLD
    )]
    pub min_score: f64,
}

impl RecaptchaConfig {
    pub(crate) fn client_config(&self) -> recaptcha::RecaptchaConfig {
        recaptcha::RecaptchaConfig {
            verify_url: self.verify_url.clone(),
            secret: self.secret.clone(),
            min_score: self.min_score,
        }
    }
}

impl std::fmt::Debug for RecaptchaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecaptchaConfig")
            .field("secret", &REDACTED)
            .field("verify_url", &self.verify_url)
            .field("min_score", &self.min_score)
            .finish()
    }
}

/// Wompi payment gateway settings.
#[derive(Args)]
pub struct WompiConfig {
    /// Wompi API root
    #[arg(id = "wompi_base_url", long = "wompi-base-url", env = "WOMPI_BASE_URL", default_value = DEFAULT_WOMPI_BASE_URL)]
    pub base_url: String,

    /// Wompi private key
    #[arg(long = "wompi-private-key", env = "WOMPI_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Wompi public key, identifies the merchant account
    #[arg(long = "wompi-public-key", env = "WOMPI_PUBLIC_KEY")]
    pub public_key: String,

    /// Wompi integrity secret used to sign transactions
    #[arg(
        long = "wompi-integrity-secret",
        env = "WOMPI_INTEGRITY_SECRET",
        hide_env_values = true
    )]
    pub integrity_secret: String,

    /// Where the hosted checkout returns the shopper
    #[arg(long = "wompi-redirect-url", env = "WOMPI_REDIRECT_URL")]
    pub redirect_url: String,
}

impl WompiConfig {
    pub(crate) fn client_config(&self) -> payments::WompiConfig {
        payments::WompiConfig {
            base_url: self.base_url.clone(),
            private_key: self.private_key.clone(),
            integrity_secret: self.integrity_secret.clone(),
            redirect_url: self.redirect_url.clone(),
        }
    }
}

impl std::fmt::Debug for WompiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WompiConfig")
            .field("base_url", &self.base_url)
            .field("private_key", &REDACTED)
            .field("public_key", &self.public_key)
            .field("integrity_secret", &REDACTED)
            .field("redirect_url", &self.redirect_url)
            .finish()
    }
}

/// Identity provider settings.
#[derive(Args)]
pub struct IdentityConfig {
    /// Identity Toolkit compatible API root
    #[arg(
        id = "identity_base_url",
        long = "identity-base-url",
        env = "IDENTITY_BASE_URL",
        default_value = DEFAULT_IDENTITY_BASE_URL
    )]
    pub base_url: String,

    /// Identity provider API key
    #[arg(long = "identity-api-key", env = "IDENTITY_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

impl IdentityConfig {
    pub(crate) fn client_config(&self) -> IdentityToolkitConfig {
        IdentityToolkitConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .finish()
    }
}

/// Outbound mail settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// Sender address for transactional mail
    #[arg(long, env = "MAIL_FROM", default_value = "no-reply@storefront.local")]
    pub mail_from: String,
}
