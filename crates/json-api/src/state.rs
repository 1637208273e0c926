//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

use crate::auth::AdminPolicy;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admins: AdminPolicy,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admins: AdminPolicy) -> Self {
        Self { app, admins }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, admins: AdminPolicy) -> Arc<Self> {
        Arc::new(Self::new(app, admins))
    }
}
