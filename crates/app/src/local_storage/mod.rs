//! Device-local storage
//!
//! String values keyed by name, scoped to one device. Guest carts, recently
//! viewed products and the pending transaction id live here.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod file;
mod memory;
mod recently_viewed;

pub use file::FileLocalStorage;
pub use memory::MemoryLocalStorage;
pub use recently_viewed::{RECENTLY_VIEWED_LIMIT, RecentlyViewed};

/// Guest cart contents.
pub const CART_KEY: &str = "cart";

/// Most-recently-viewed product ids.
pub const RECENTLY_VIEWED_KEY: &str = "recentlyViewed";

/// Transaction id of the checkout awaiting confirmation.
pub const TRANSACTION_ID_KEY: &str = "transactionId";

#[derive(Debug, Error)]
pub enum LocalStorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage I/O error")]
    Io(#[from] std::io::Error),

    #[error("stored value could not be encoded")]
    Encode(#[source] serde_json::Error),
}

#[automock]
#[async_trait]
pub trait LocalStorage: Send + Sync {
    /// Read a value.
    async fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError>;

    /// Write a value, replacing any previous one.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError>;

    /// Remove a value. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), LocalStorageError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), LocalStorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(LocalStorageError::InvalidKey(key.to_string()))
    }
}
