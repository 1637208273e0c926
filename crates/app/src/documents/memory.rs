//! In-memory document store

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use serde_json::Value;
use tokio::sync::{RwLock, watch};

use crate::documents::{
    CollectionPath, Document, DocumentPath, DocumentStore, DocumentStoreError,
    DocumentSubscription, generate_id,
};

#[derive(Debug, Default)]
struct Collections {
    documents: HashMap<CollectionPath, Vec<Document>>,
    listeners: HashMap<DocumentPath, watch::Sender<Option<Document>>>,
}

impl Collections {
    fn find(&self, path: &DocumentPath) -> Option<&Document> {
        self.documents
            .get(path.collection())?
            .iter()
            .find(|document| document.id == path.id())
    }

    fn notify(&mut self, path: &DocumentPath) {
        let current = self.find(path).cloned();

        if let Some(sender) = self.listeners.get(path) {
            if sender.receiver_count() == 0 {
                self.listeners.remove(path);
            } else {
                sender.send_replace(current);
            }
        }
    }
}

/// Document store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Collections>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentStoreError> {
        Ok(self.inner.read().await.find(path).cloned())
    }

    async fn set(&self, path: &DocumentPath, data: Value) -> Result<(), DocumentStoreError> {
        let mut inner = self.inner.write().await;
        let now = Timestamp::now();

        let documents = inner
            .documents
            .entry(path.collection().clone())
            .or_default();

        match documents.iter_mut().find(|document| document.id == path.id()) {
            Some(existing) => {
                existing.data = data;
                existing.updated_at = now;
            }
            None => documents.push(Document {
                id: path.id().to_string(),
                data,
                created_at: now,
                updated_at: now,
            }),
        }

        inner.notify(path);

        Ok(())
    }

    async fn add(
        &self,
        collection: &CollectionPath,
        data: Value,
    ) -> Result<DocumentPath, DocumentStoreError> {
        let path = collection.doc(&generate_id())?;

        self.set(&path, data).await?;

        Ok(path)
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, DocumentStoreError> {
        let mut inner = self.inner.write().await;

        let Some(documents) = inner.documents.get_mut(path.collection()) else {
            return Ok(false);
        };

        let before = documents.len();
        documents.retain(|document| document.id != path.id());
        let existed = documents.len() != before;

        if existed {
            inner.notify(path);
        }

        Ok(existed)
    }

    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, DocumentStoreError> {
        Ok(self
            .inner
            .read()
            .await
            .documents
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn listen(
        &self,
        path: &DocumentPath,
    ) -> Result<DocumentSubscription, DocumentStoreError> {
        let mut inner = self.inner.write().await;
        let current = inner.find(path).cloned();

        if let Some(sender) = inner.listeners.get(path) {
            return Ok(sender.subscribe());
        }

        let (sender, receiver) = watch::channel(current);

        inner.listeners.insert(path.clone(), sender);

        Ok(receiver)
    }
}
