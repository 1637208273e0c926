//! Document store
//!
//! JSON documents addressed by path, with one-shot reads and long-lived
//! subscriptions. Writes are last-write-wins; there is no version check.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

mod memory;
mod path;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use path::{CollectionPath, DocumentPath};
pub use postgres::PgDocumentStore;

/// Errors raised by document store backends.
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("invalid document path: {0}")]
    InvalidPath(String),

    #[error("document {path} could not be decoded")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document could not be encoded")]
    Encode(#[source] serde_json::Error),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

/// Stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document id within its collection
    pub id: String,

    /// Document body
    pub data: Value,

    /// First write
    pub created_at: Timestamp,

    /// Latest write
    pub updated_at: Timestamp,
}

impl Document {
    /// Decode the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DocumentStoreError> {
        T::deserialize(&self.data).map_err(|source| DocumentStoreError::Decode {
            path: self.id.clone(),
            source,
        })
    }
}

/// Subscription to a single document. Dropping it tears the listener down.
pub type DocumentSubscription = watch::Receiver<Option<Document>>;

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentStoreError>;

    /// Create or replace a document.
    async fn set(&self, path: &DocumentPath, data: Value) -> Result<(), DocumentStoreError>;

    /// Create a document with a generated id.
    async fn add(
        &self,
        collection: &CollectionPath,
        data: Value,
    ) -> Result<DocumentPath, DocumentStoreError>;

    /// Delete a document, returning whether it existed.
    async fn delete(&self, path: &DocumentPath) -> Result<bool, DocumentStoreError>;

    /// Documents of a collection in creation order.
    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, DocumentStoreError>;

    /// Subscribe to a document. The receiver starts with the current value
    /// and sees every later write until it is dropped.
    async fn listen(&self, path: &DocumentPath)
    -> Result<DocumentSubscription, DocumentStoreError>;
}

/// Read and decode a document.
///
/// # Errors
///
/// Returns an error when the backend fails or the body does not decode.
pub async fn read<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    path: &DocumentPath,
) -> Result<Option<T>, DocumentStoreError> {
    store
        .get(path)
        .await?
        .map(|document| document.decode())
        .transpose()
}

/// Encode and write a document.
///
/// # Errors
///
/// Returns an error when encoding or the backend fails.
pub async fn write<T: Serialize + Sync>(
    store: &dyn DocumentStore,
    path: &DocumentPath,
    value: &T,
) -> Result<(), DocumentStoreError> {
    let data = serde_json::to_value(value).map_err(DocumentStoreError::Encode)?;

    store.set(path, data).await
}

/// Encode and append a document with a generated id.
///
/// # Errors
///
/// Returns an error when encoding or the backend fails.
pub async fn append<T: Serialize + Sync>(
    store: &dyn DocumentStore,
    collection: &CollectionPath,
    value: &T,
) -> Result<DocumentPath, DocumentStoreError> {
    let data = serde_json::to_value(value).map_err(DocumentStoreError::Encode)?;

    store.add(collection, data).await
}

pub(crate) fn generate_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}
