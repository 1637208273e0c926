//! Product reviews

pub mod errors;
pub mod models;
pub mod service;

pub use errors::ReviewsServiceError;
pub use service::*;
