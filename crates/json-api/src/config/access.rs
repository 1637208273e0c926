//! Access Config

use clap::Args;

/// Admin and cross-origin settings.
#[derive(Debug, Args)]
pub struct AccessConfig {
    /// Comma-separated emails allowed to manage the catalog
    #[arg(long, env = "ADMIN_EMAILS", value_delimiter = ',')]
    pub admin_emails: Vec<String>,

    /// Comma-separated origins allowed to call the API from a browser
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_allowed_origins: Vec<String>,
}
