//! Authentication
//!
//! Requests carry an ID token issued by the identity provider. The middleware
//! resolves it to an account; the admin guard additionally checks the account
//! email against the configured admin list.

mod admin;
pub(crate) mod middleware;

pub(crate) use admin::{AdminPolicy, admin_guard};
