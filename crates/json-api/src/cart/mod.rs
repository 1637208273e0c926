//! Account Cart
//!
//! The signed-in customer's cart. Every mutation answers with the updated
//! cart and the notice to show.

mod errors;
mod handlers;
pub(crate) mod items;
mod models;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
pub(crate) use models::{CartChangeResponse, CartResponse};
