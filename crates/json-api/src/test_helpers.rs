//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use storefront::products::{Discount, Product, ProductId};
use storefront_app::{
    context::AppContext,
    documents::{DocumentStoreError, MemoryDocumentStore},
    domain::{
        accounts::MockAccountsService, carts::MockCartsService, payments::MockPaymentsService,
        products::MockProductsService, reviews::MockReviewsService,
        wishlists::MockWishlistsService,
    },
    identity::{AuthenticatedUser, MockIdentityProvider, UserId},
};
use testresult::TestResult;

use crate::{auth::AdminPolicy, extensions::*, state::State};

pub(crate) const TEST_UID: &str = "user-1";
pub(crate) const ADMIN_EMAIL: &str = "admin@example.com";

/// Service mocks. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) identity: MockIdentityProvider,
    pub(crate) products: MockProductsService,
    pub(crate) reviews: MockReviewsService,
    pub(crate) wishlists: MockWishlistsService,
    pub(crate) carts: MockCartsService,
    pub(crate) accounts: MockAccountsService,
    pub(crate) payments: MockPaymentsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            documents: Arc::new(MemoryDocumentStore::new()),
            identity: Arc::new(self.identity),
            products: Arc::new(self.products),
            reviews: Arc::new(self.reviews),
            wishlists: Arc::new(self.wishlists),
            carts: Arc::new(self.carts),
            accounts: Arc::new(self.accounts),
            payments: Arc::new(self.payments),
        };

        State::shared(app, AdminPolicy::new([ADMIN_EMAIL]))
    }
}

pub(crate) fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        uid: UserId::new(TEST_UID),
        email: "ana@example.com".to_string(),
    }
}

pub(crate) fn test_admin() -> AuthenticatedUser {
    AuthenticatedUser {
        uid: UserId::new("admin-1"),
        email: ADMIN_EMAIL.to_string(),
    }
}

pub(crate) fn make_product(id: &str, price: u64) -> TestResult<Product> {
    Ok(Product {
        id: ProductId::new(id)?,
        name: format!("Product {id}"),
        price,
        image: None,
        category: Some("storage".to_string()),
        description: None,
        discount: Discount::NONE,
        sales: 0,
        stock: Some(5),
        coupon: None,
    })
}

/// Store failure for exercising 500 paths.
pub(crate) fn store_error() -> DocumentStoreError {
    DocumentStoreError::InvalidPath("products/".to_string())
}

struct InjectIdentity(AuthenticatedUser);

#[handler]
impl InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_identity(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

/// Service acting on behalf of `identity`, skipping token verification.
pub(crate) fn service(mocks: Mocks, identity: AuthenticatedUser, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectIdentity(identity))
            .push(route),
    )
}

/// Service for routes that need no identity.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .push(route),
    )
}
