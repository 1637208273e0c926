//! Review Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront_app::domain::reviews::models::Review;

pub(crate) mod create;
pub(crate) mod index;

/// Product review
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub id: String,

    /// Author account
    pub user_id: String,

    /// Author email, shown next to the comment
    pub user_email: String,

    pub comment: String,

    /// RFC 3339 timestamp
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id,
            user_id: review.user_id.to_string(),
            user_email: review.user_email,
            comment: review.comment,
            created_at: review.created_at.to_string(),
        }
    }
}
