//! Recently viewed products

use storefront::products::ProductId;
use tracing::warn;

use crate::local_storage::{LocalStorage, LocalStorageError, RECENTLY_VIEWED_KEY};

/// Maximum number of remembered products.
pub const RECENTLY_VIEWED_LIMIT: usize = 10;

/// Most-recent-first list of product ids without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentlyViewed {
    ids: Vec<ProductId>,
}

impl RecentlyViewed {
    /// Load the list from device storage. Unreadable data is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage backend fails.
    pub async fn load(storage: &dyn LocalStorage) -> Result<Self, LocalStorageError> {
        let Some(raw) = storage.get_item(RECENTLY_VIEWED_KEY).await? else {
            return Ok(Self::default());
        };

        match serde_json::from_str::<Vec<ProductId>>(&raw) {
            Ok(mut ids) => {
                ids.truncate(RECENTLY_VIEWED_LIMIT);

                Ok(Self { ids })
            }
            Err(error) => {
                warn!(%error, "discarding unreadable recently viewed list");

                Ok(Self::default())
            }
        }
    }

    /// Move `id` to the front, dropping the oldest entry beyond the limit.
    pub fn record(&mut self, id: ProductId) {
        self.ids.retain(|existing| existing != &id);
        self.ids.insert(0, id);
        self.ids.truncate(RECENTLY_VIEWED_LIMIT);
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Persist the list to device storage.
    ///
    /// # Errors
    ///
    /// Returns an error when encoding or the storage backend fails.
    pub async fn save(&self, storage: &dyn LocalStorage) -> Result<(), LocalStorageError> {
        let raw = serde_json::to_string(&self.ids).map_err(LocalStorageError::Encode)?;

        storage.set_item(RECENTLY_VIEWED_KEY, &raw).await
    }

    /// Record a product view and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage backend fails.
    pub async fn record_view(
        storage: &dyn LocalStorage,
        id: ProductId,
    ) -> Result<Self, LocalStorageError> {
        let mut recent = Self::load(storage).await?;

        recent.record(id);
        recent.save(storage).await?;

        Ok(recent)
    }
}
