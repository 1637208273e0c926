//! Products

mod errors;
mod handlers;
mod models;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
pub(crate) use models::{ProductResponse, parse_product_id};
