//! Identity provider
//!
//! Accounts, sign-in and ID token verification are delegated to an external
//! provider speaking the Identity Toolkit REST protocol.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod client;
mod password;

pub use client::{DEFAULT_IDENTITY_BASE_URL, IdentityToolkitClient, IdentityToolkitConfig};
pub use password::{MIN_PASSWORD_LENGTH, Password};

/// Account identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Verified account identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uid: UserId,
    pub email: String,
}

/// Result of a successful password sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInUser {
    pub user: AuthenticatedUser,
    pub id_token: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("an account already exists for this email")]
    EmailExists,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password does not meet the provider's requirements")]
    WeakPassword,

    #[error("id token is invalid or expired")]
    InvalidToken,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an email/password account.
    async fn create_user(
        &self,
        email: &str,
        password: &Password,
    ) -> Result<AuthenticatedUser, IdentityError>;

    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &Password)
    -> Result<SignedInUser, IdentityError>;

    /// Resolve an ID token to the account it was issued for.
    async fn verify_id_token(&self, id_token: &str) -> Result<AuthenticatedUser, IdentityError>;
}
