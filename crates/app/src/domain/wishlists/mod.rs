//! Wishlists

pub mod errors;
pub mod models;
pub mod service;

pub use errors::WishlistsServiceError;
pub use service::*;
