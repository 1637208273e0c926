//! Reviews service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use storefront::products::ProductId;
use tracing::info;

use crate::{
    documents::{self, CollectionPath, DocumentStore, DocumentStoreError},
    domain::{
        products::{ProductsService, service::product_path},
        reviews::{errors::ReviewsServiceError, models::Review},
    },
    identity::AuthenticatedUser,
};

fn reviews_collection(product: &ProductId) -> Result<CollectionPath, DocumentStoreError> {
    product_path(product)?.collection_under("reviews")
}

#[derive(Clone)]
pub struct DocumentReviewsService {
    documents: Arc<dyn DocumentStore>,
    products: Arc<dyn ProductsService>,
}

impl DocumentReviewsService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, products: Arc<dyn ProductsService>) -> Self {
        Self {
            documents,
            products,
        }
    }
}

impl std::fmt::Debug for DocumentReviewsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentReviewsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl ReviewsService for DocumentReviewsService {
    async fn list_reviews(&self, product: &ProductId) -> Result<Vec<Review>, ReviewsServiceError> {
        self.products.get_product(product).await?;

        let documents = self.documents.list(&reviews_collection(product)?).await?;

        documents
            .iter()
            .map(|document| -> Result<Review, ReviewsServiceError> {
                let mut review: Review = document.decode()?;
                review.id.clone_from(&document.id);

                Ok(review)
            })
            .collect()
    }

    async fn add_review(
        &self,
        product: &ProductId,
        author: &AuthenticatedUser,
        comment: &str,
    ) -> Result<Review, ReviewsServiceError> {
        let comment = comment.trim();

        if comment.is_empty() {
            return Err(ReviewsServiceError::EmptyComment);
        }

        self.products.get_product(product).await?;

        let mut review = Review {
            id: String::new(),
            user_id: author.uid.clone(),
            user_email: author.email.clone(),
            comment: comment.to_string(),
            created_at: Timestamp::now(),
        };

        let path =
            documents::append(self.documents.as_ref(), &reviews_collection(product)?, &review)
                .await?;

        review.id = path.id().to_string();

        info!(%product, user = %author.uid, review = %review.id, "added review");

        Ok(review)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Reviews of a product, oldest first.
    async fn list_reviews(&self, product: &ProductId) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Append a review. The comment is trimmed and must not be empty.
    async fn add_review(
        &self,
        product: &ProductId,
        author: &AuthenticatedUser,
        comment: &str,
    ) -> Result<Review, ReviewsServiceError>;
}
