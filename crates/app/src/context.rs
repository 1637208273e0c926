//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    database,
    documents::{DocumentStore, DocumentStoreError, MemoryDocumentStore, PgDocumentStore},
    domain::{
        accounts::{AccountsService, LogMailer, ProviderAccountsService},
        carts::{CartsService, DocumentCartsService},
        payments::{GatewayPaymentsService, PaymentsService, WompiClient, WompiConfig},
        products::{DocumentProductsService, ProductsService},
        reviews::{DocumentReviewsService, ReviewsService},
        wishlists::{DocumentWishlistsService, WishlistsService},
    },
    identity::{IdentityProvider, IdentityToolkitClient, IdentityToolkitConfig},
    recaptcha::{RecaptchaClient, RecaptchaConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("DATABASE_URL is required for the postgres document store")]
    MissingDatabaseUrl,

    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to prepare document store")]
    Documents(#[source] DocumentStoreError),
}

/// Document store backend.
#[derive(Clone, PartialEq, Eq)]
pub enum DocumentBackend {
    /// Process-local store, lost on restart.
    Memory,

    /// `PostgreSQL` JSONB table.
    Postgres { url: String },
}

impl std::fmt::Debug for DocumentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("url", &"**redacted**")
                .finish(),
        }
    }
}

/// Everything needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub documents: DocumentBackend,
    pub recaptcha: RecaptchaConfig,
    pub wompi: WompiConfig,
    pub identity: IdentityToolkitConfig,
    pub mail_from: String,
}

/// Service handles shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub documents: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub products: Arc<dyn ProductsService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub carts: Arc<dyn CartsService>,
    pub accounts: Arc<dyn AccountsService>,
    pub payments: Arc<dyn PaymentsService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the document store cannot be reached or prepared.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let documents = open_documents(&config.documents).await?;

        Ok(Self::with_documents(documents, config))
    }

    /// Wire services over an existing document store.
    #[must_use]
    pub fn with_documents(documents: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(IdentityToolkitClient::new(config.identity));
        let products: Arc<dyn ProductsService> =
            Arc::new(DocumentProductsService::new(documents.clone()));

        Self {
            reviews: Arc::new(DocumentReviewsService::new(
                documents.clone(),
                products.clone(),
            )),
            wishlists: Arc::new(DocumentWishlistsService::new(
                documents.clone(),
                products.clone(),
            )),
            carts: Arc::new(DocumentCartsService::new(
                documents.clone(),
                products.clone(),
            )),
            accounts: Arc::new(ProviderAccountsService::new(
                Arc::new(RecaptchaClient::new(config.recaptcha)),
                identity.clone(),
                Arc::new(LogMailer::new(config.mail_from)),
            )),
            payments: Arc::new(GatewayPaymentsService::new(Arc::new(WompiClient::new(
                config.wompi,
            )))),
            products,
            identity,
            documents,
        }
    }
}

/// Open the configured document store, applying the schema for `PostgreSQL`.
///
/// # Errors
///
/// Returns an error when the database cannot be reached or the schema fails to apply.
pub async fn open_documents(
    backend: &DocumentBackend,
) -> Result<Arc<dyn DocumentStore>, AppInitError> {
    match backend {
        DocumentBackend::Memory => {
            info!("using in-memory document store");

            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        DocumentBackend::Postgres { url } => {
            let pool = database::connect(url)
                .await
                .map_err(AppInitError::Database)?;

            let store = PgDocumentStore::new(pool);

            store
                .ensure_schema()
                .await
                .map_err(AppInitError::Documents)?;

            info!("using postgres document store");

            Ok(Arc::new(store))
        }
    }
}

impl DocumentBackend {
    /// Resolve a backend name and optional database URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppInitError::MissingDatabaseUrl`] when `postgres` is chosen without a URL.
    pub fn resolve(postgres: bool, url: Option<String>) -> Result<Self, AppInitError> {
        if !postgres {
            return Ok(Self::Memory);
        }

        url.map(|url| Self::Postgres { url })
            .ok_or(AppInitError::MissingDatabaseUrl)
    }
}
