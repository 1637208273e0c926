//! Server configuration module

use clap::Parser;
use storefront_app::context::{AppConfig, AppInitError};

use crate::config::{
    access::AccessConfig,
    documents::DocumentStoreConfig,
    integrations::{IdentityConfig, MailConfig, RecaptchaConfig, WompiConfig},
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod access;
pub(crate) mod documents;
pub(crate) mod integrations;
pub(crate) mod observability;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Document store settings.
    #[command(flatten)]
    pub documents: DocumentStoreConfig,

    /// Bot verification settings.
    #[command(flatten)]
    pub recaptcha: RecaptchaConfig,

    /// Payment gateway settings.
    #[command(flatten)]
    pub wompi: WompiConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentityConfig,

    /// Outbound mail settings.
    #[command(flatten)]
    pub mail: MailConfig,

    /// Admin and CORS settings.
    #[command(flatten)]
    pub access: AccessConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Application service configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the postgres document store is selected without a URL.
    pub fn app_config(&self) -> Result<AppConfig, AppInitError> {
        Ok(AppConfig {
            documents: self.documents.backend()?,
            recaptcha: self.recaptcha.client_config(),
            wompi: self.wompi.client_config(),
            identity: self.identity.client_config(),
            mail_from: self.mail.mail_from.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use storefront_app::context::DocumentBackend;
    use testresult::TestResult;

    use super::*;

    fn parse(args: &[&str]) -> Result<ServerConfig, clap::Error> {
        ServerConfig::try_parse_from(
            [
                "storefront-json",
                "--recaptcha-secret",
                "recaptcha-secret",
                "--wompi-private-key",
                "prv_test_key",
                "--wompi-public-key",
                "pub_test_key",
                "--wompi-integrity-secret",
                "test_integrity",
                "--wompi-redirect-url",
                "https://shop.example.com/success",
                "--identity-api-key",
                "identity-key",
            ]
            .iter()
            .chain(args),
        )
    }

    #[test]
    fn defaults_use_memory_store_and_sandbox_gateway() -> TestResult {
        let config = parse(&[])?;
        let app = config.app_config()?;

        assert_eq!(app.documents, DocumentBackend::Memory);
        assert_eq!(app.wompi.base_url, "https://sandbox.wompi.co");
        assert!((app.recaptcha.min_score - 0.5).abs() < f64::EPSILON);

        Ok(())
    }

    #[test]
    fn postgres_store_requires_database_url() -> TestResult {
        let config = parse(&["--document-store", "postgres"])?;

        let result = config.app_config();

        assert!(
            matches!(result, Err(AppInitError::MissingDatabaseUrl)),
            "expected MissingDatabaseUrl, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn admin_emails_are_comma_separated() -> TestResult {
        let config = parse(&["--admin-emails", "ana@example.com,ops@example.com"])?;

        assert_eq!(
            config.access.admin_emails,
            vec!["ana@example.com", "ops@example.com"]
        );

        Ok(())
    }

    #[test]
    fn debug_output_hides_secrets() -> TestResult {
        let rendered = format!("{:?}", parse(&[])?);

        assert!(!rendered.contains("prv_test_key"), "private key leaked");
        assert!(!rendered.contains("test_integrity"), "integrity secret leaked");
        assert!(!rendered.contains("recaptcha-secret"), "recaptcha secret leaked");
        assert!(!rendered.contains("identity-key"), "identity key leaked");

        Ok(())
    }
}
