//! Wishlists service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use storefront::products::ProductId;
use tracing::info;

use crate::{
    documents::{self, CollectionPath, DocumentPath, DocumentStore, DocumentStoreError},
    domain::{
        products::{ProductsService, ProductsServiceError},
        wishlists::{
            errors::WishlistsServiceError,
            models::{WishlistEntry, WishlistRecord, WishlistToggle},
        },
    },
    identity::UserId,
};

fn wishlist_collection(user: &UserId) -> Result<CollectionPath, DocumentStoreError> {
    CollectionPath::root("wishlists")?
        .doc(user.as_str())?
        .collection_under("products")
}

#[derive(Clone)]
pub struct DocumentWishlistsService {
    documents: Arc<dyn DocumentStore>,
    products: Arc<dyn ProductsService>,
}

impl DocumentWishlistsService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, products: Arc<dyn ProductsService>) -> Self {
        Self {
            documents,
            products,
        }
    }

    async fn records(
        &self,
        user: &UserId,
    ) -> Result<Vec<(DocumentPath, WishlistRecord)>, WishlistsServiceError> {
        let collection = wishlist_collection(user)?;
        let documents = self.documents.list(&collection).await?;

        documents
            .iter()
            .map(|document| -> Result<_, WishlistsServiceError> {
                Ok((collection.doc(&document.id)?, document.decode()?))
            })
            .collect()
    }
}

impl std::fmt::Debug for DocumentWishlistsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentWishlistsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl WishlistsService for DocumentWishlistsService {
    async fn list(&self, user: &UserId) -> Result<Vec<WishlistEntry>, WishlistsServiceError> {
        let mut entries = Vec::new();

        for (_, record) in self.records(user).await? {
            let product = match self.products.get_product(&record.product_id).await {
                Ok(product) => Some(product),
                Err(ProductsServiceError::NotFound) => None,
                Err(error) => return Err(error.into()),
            };

            entries.push(WishlistEntry {
                product_id: record.product_id,
                added_at: record.added_at,
                product,
            });
        }

        Ok(entries)
    }

    async fn toggle(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<WishlistToggle, WishlistsServiceError> {
        let existing = self
            .records(user)
            .await?
            .into_iter()
            .find(|(_, record)| &record.product_id == product);

        if let Some((path, _)) = existing {
            self.documents.delete(&path).await?;

            info!(%user, %product, "removed product from wishlist");

            return Ok(WishlistToggle::Removed);
        }

        self.products.get_product(product).await?;

        let record = WishlistRecord {
            product_id: product.clone(),
            added_at: Timestamp::now(),
        };

        documents::append(self.documents.as_ref(), &wishlist_collection(user)?, &record).await?;

        info!(%user, %product, "added product to wishlist");

        Ok(WishlistToggle::Added)
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// Wishlist entries in the order they were added.
    async fn list(&self, user: &UserId) -> Result<Vec<WishlistEntry>, WishlistsServiceError>;

    /// Add the product when absent, remove it when present.
    async fn toggle(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<WishlistToggle, WishlistsServiceError>;
}
