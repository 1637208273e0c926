//! PostgreSQL document store
//!
//! Documents live in a single JSONB table keyed by collection path and id.
//! A trigger publishes every change on the `document_changes` channel, which
//! backs [`DocumentStore::listen`].

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{
    FromRow, PgPool, Row,
    postgres::{PgListener, PgRow},
    query, query_as, raw_sql,
    types::Json,
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::documents::{
    CollectionPath, Document, DocumentPath, DocumentStore, DocumentStoreError,
    DocumentSubscription, generate_id,
};

const SCHEMA_SQL: &str = include_str!("sql/schema.sql");
const GET_DOCUMENT_SQL: &str = include_str!("sql/get_document.sql");
const SET_DOCUMENT_SQL: &str = include_str!("sql/set_document.sql");
const DELETE_DOCUMENT_SQL: &str = include_str!("sql/delete_document.sql");
const LIST_DOCUMENTS_SQL: &str = include_str!("sql/list_documents.sql");

const CHANGES_CHANNEL: &str = "document_changes";

struct DocumentRow(Document);

impl<'r> FromRow<'r, PgRow> for DocumentRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(Document {
            id: row.try_get("id")?,
            data: row.try_get::<Json<Value>, _>("data")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        }))
    }
}

async fn fetch_document(
    pool: &PgPool,
    path: &DocumentPath,
) -> Result<Option<Document>, DocumentStoreError> {
    let row = query_as::<_, DocumentRow>(GET_DOCUMENT_SQL)
        .bind(path.collection().as_str())
        .bind(path.id())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.0))
}

/// Document store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the documents table and change trigger when missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema statements fail.
    pub async fn ensure_schema(&self) -> Result<(), DocumentStoreError> {
        raw_sql(SCHEMA_SQL).execute(&self.pool).await?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentStoreError> {
        fetch_document(&self.pool, path).await
    }

    async fn set(&self, path: &DocumentPath, data: Value) -> Result<(), DocumentStoreError> {
        query(SET_DOCUMENT_SQL)
            .bind(path.collection().as_str())
            .bind(path.id())
            .bind(Json(data))
            .execute(&self.pool)
            .await?;

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
        let result = query(DELETE_DOCUMENT_SQL)
            .bind(path.collection().as_str())
            .bind(path.id())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, collection: &CollectionPath) -> Result<Vec<Document>, DocumentStoreError> {
        let rows = query_as::<_, DocumentRow>(LIST_DOCUMENTS_SQL)
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    async fn listen(
        &self,
        path: &DocumentPath,
    ) -> Result<DocumentSubscription, DocumentStoreError> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(CHANGES_CHANNEL).await?;

        let current = fetch_document(&self.pool, path).await?;
        let (sender, receiver) = watch::channel(current);

        let pool = self.pool.clone();
        let path = path.clone();
        let key = path.to_string();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = sender.closed() => {
                        debug!(path = %key, "document listener closed");
                        break;
                    }
                    notification = listener.recv() => match notification {
                        Ok(notification) if notification.payload() == key => {
                            match fetch_document(&pool, &path).await {
                                Ok(document) => {
                                    sender.send_replace(document);
                                }
                                Err(error) => warn!(path = %key, %error, "failed to refresh document"),
                            }
                        }
                        Ok(_) => {}
                        Err(error) => {
                            warn!(path = %key, %error, "document listener failed");
                            break;
                        }
                    },
                }
            }
        });

        Ok(receiver)
    }
}
