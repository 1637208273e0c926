//! Callable request/response envelope.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Callable payload: requests and successful responses both carry their
/// content under `data`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Callable<T: ToSchema + 'static> {
    /// Payload
    pub data: T,
}

impl<T: ToSchema + 'static> Callable<T> {
    pub(crate) fn new(data: T) -> Self {
        Self { data }
    }

    pub(crate) fn into_inner(self) -> T {
        self.data
    }
}
