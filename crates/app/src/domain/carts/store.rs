//! Cart stores
//!
//! Where a cart is persisted: device-local storage for guests, a remote
//! `carts/{uid}` document for signed-in accounts.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use storefront::cart::Cart;
use tracing::warn;

use crate::{
    documents::{self, CollectionPath, Document, DocumentPath, DocumentStore, DocumentSubscription},
    domain::carts::errors::CartsServiceError,
    identity::UserId,
    local_storage::{CART_KEY, LocalStorage},
};

#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Read the persisted cart; missing or unreadable data yields an empty cart.
    async fn load(&self) -> Result<Cart, CartsServiceError>;

    /// Replace the persisted cart.
    async fn save(&self, cart: &Cart) -> Result<(), CartsServiceError>;
}

/// Guest cart kept under the `cart` key of device storage.
#[derive(Clone)]
pub struct LocalCartStore {
    storage: Arc<dyn LocalStorage>,
}

impl LocalCartStore {
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Forget the guest cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage backend fails.
    pub async fn clear(&self) -> Result<(), CartsServiceError> {
        self.storage.remove_item(CART_KEY).await?;

        Ok(())
    }
}

impl std::fmt::Debug for LocalCartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCartStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl CartStore for LocalCartStore {
    async fn load(&self) -> Result<Cart, CartsServiceError> {
        let Some(raw) = self.storage.get_item(CART_KEY).await? else {
            return Ok(Cart::new());
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => Ok(Cart::from_items(cart.items().iter().cloned())),
            Err(error) => {
                warn!(%error, "discarding unreadable guest cart");

                Ok(Cart::new())
            }
        }
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartsServiceError> {
        let raw = serde_json::to_string(cart).map_err(CartsServiceError::Encode)?;

        self.storage.set_item(CART_KEY, &raw).await?;

        Ok(())
    }
}

/// Body of a remote cart document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteCartDocument {
    #[serde(default)]
    pub items: Cart,
}

/// Decode a remote cart snapshot; unreadable documents yield an empty cart.
pub(crate) fn cart_from_snapshot(snapshot: Option<&Document>) -> Cart {
    let Some(document) = snapshot else {
        return Cart::new();
    };

    match document.decode::<RemoteCartDocument>() {
        Ok(body) => Cart::from_items(body.items.items().iter().cloned()),
        Err(error) => {
            warn!(cart = %document.id, %error, "discarding unreadable remote cart");

            Cart::new()
        }
    }
}

/// Account cart stored as the `carts/{uid}` document.
#[derive(Clone)]
pub struct RemoteCartStore {
    documents: Arc<dyn DocumentStore>,
    path: DocumentPath,
}

impl RemoteCartStore {
    /// Store for `user`'s cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the user id cannot form a document path.
    pub fn new(documents: Arc<dyn DocumentStore>, user: &UserId) -> Result<Self, CartsServiceError> {
        let path = CollectionPath::root("carts")?.doc(user.as_str())?;

        Ok(Self { documents, path })
    }

    #[must_use]
    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    /// Subscribe to remote changes.
    ///
    /// # Errors
    ///
    /// Returns an error when the document store cannot start a listener.
    pub async fn subscribe(&self) -> Result<DocumentSubscription, CartsServiceError> {
        Ok(self.documents.listen(&self.path).await?)
    }
}

impl std::fmt::Debug for RemoteCartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCartStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CartStore for RemoteCartStore {
    async fn load(&self) -> Result<Cart, CartsServiceError> {
        let snapshot = self.documents.get(&self.path).await?;

        Ok(cart_from_snapshot(snapshot.as_ref()))
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartsServiceError> {
        let body = RemoteCartDocument {
            items: cart.clone(),
        };

        documents::write(self.documents.as_ref(), &self.path, &body).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        documents::MemoryDocumentStore, local_storage::MemoryLocalStorage, test::catalog_product,
    };

    use super::*;

    #[tokio::test]
    async fn local_store_round_trips_guest_cart() -> TestResult {
        let storage = Arc::new(MemoryLocalStorage::new());
        let store = LocalCartStore::new(storage.clone());

        let mut cart = Cart::new();
        cart.add(&catalog_product("fan", 30_000, 0, None)?, 2)?;

        store.save(&cart).await?;

        assert_eq!(store.load().await?, cart);
        assert!(storage.get_item(CART_KEY).await?.is_some_and(|raw| raw.starts_with('[')));

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_guest_cart_loads_empty() -> TestResult {
        let storage = Arc::new(MemoryLocalStorage::new());
        storage.set_item(CART_KEY, "not json").await?;

        let cart = LocalCartStore::new(storage).load().await?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn remote_store_writes_items_document() -> TestResult {
        let documents = Arc::new(MemoryDocumentStore::new());
        let store = RemoteCartStore::new(documents.clone(), &UserId::new("u1"))?;

        let mut cart = Cart::new();
        cart.add(&catalog_product("psu", 400_000, 10, Some(4))?, 1)?;

        store.save(&cart).await?;

        let document = documents
            .get(&DocumentPath::parse("carts/u1")?)
            .await?
            .ok_or("cart document should exist")?;

        assert_eq!(
            document.data.pointer("/items/0/id"),
            Some(&serde_json::json!("psu"))
        );
        assert_eq!(store.load().await?, cart);

        Ok(())
    }
}
