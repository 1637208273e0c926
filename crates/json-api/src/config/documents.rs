//! Document Store Config

use clap::{Args, ValueEnum};
use storefront_app::context::{AppInitError, DocumentBackend};

/// Document store backend name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocumentStoreKind {
    /// In-process store, lost on restart.
    Memory,

    /// `PostgreSQL` JSONB table.
    Postgres,
}

/// Document store settings.
#[derive(Args)]
pub struct DocumentStoreConfig {
    /// Document store backend (memory, postgres)
    #[arg(long, env = "DOCUMENT_STORE", value_enum, default_value_t = DocumentStoreKind::Memory)]
    pub document_store: DocumentStoreKind,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl DocumentStoreConfig {
    /// Resolve the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`AppInitError::MissingDatabaseUrl`] when `postgres` is chosen without a URL.
    pub fn backend(&self) -> Result<DocumentBackend, AppInitError> {
        DocumentBackend::resolve(
            self.document_store == DocumentStoreKind::Postgres,
            self.database_url.clone(),
        )
    }
}

impl std::fmt::Debug for DocumentStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStoreConfig")
            .field("document_store", &self.document_store)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "**redacted**"),
            )
            .finish()
    }
}
