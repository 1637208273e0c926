//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::identity::AuthenticatedUser;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: AuthenticatedUser);

    fn identity_or_401(&self) -> Result<&AuthenticatedUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: AuthenticatedUser) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<&AuthenticatedUser, StatusError> {
        self.obtain::<AuthenticatedUser>()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
