//! Carts
//!
//! Device-scoped guest carts and account-scoped remote carts, kept in sync by
//! [`CartSynchronizer`].

pub mod errors;
pub mod service;
pub mod store;
pub mod synchronizer;

pub use errors::CartsServiceError;
pub use service::*;
pub use store::{CartStore, LocalCartStore, RemoteCartStore};
pub use synchronizer::{CartChange, CartScope, CartSynchronizer};
