//! Callable endpoints
//!
//! RPC-style endpoints invoked by the storefront client. Each takes a
//! `{"data": ...}` body and answers with `{"data": ...}` or the error envelope.

use std::sync::Arc;

use salvo::prelude::Depot;

use crate::state::State;

mod envelope;
mod errors;
mod handlers;

pub(crate) use envelope::Callable;
pub(crate) use errors::CallableError;
pub(crate) use handlers::*;

pub(crate) fn app_state(depot: &Depot) -> Result<&Arc<State>, CallableError> {
    depot
        .obtain::<Arc<State>>()
        .map_err(|_ignored| CallableError::internal("Server state unavailable"))
}
