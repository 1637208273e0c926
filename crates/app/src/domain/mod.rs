//! Storefront Domain Concerns

pub mod accounts;
pub mod carts;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod wishlists;
