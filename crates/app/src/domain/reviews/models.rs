//! Review models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Stored review. Reviews are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Document id, filled in when read back
    #[serde(default, skip_serializing)]
    pub id: String,
    pub user_id: UserId,
    pub user_email: String,
    pub comment: String,
    pub created_at: Timestamp,
}
