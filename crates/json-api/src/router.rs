//! App Router

use salvo::Router;

use crate::{auth, callable, cart, healthcheck, products, reviews, wishlist};

/// Every API route. State, CORS and logging are attached by the caller.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(callable_router())
        .push(catalog_router())
        .push(customer_router())
        .push(admin_router())
}

/// Callable endpoints. These are public; account operations are guarded by
/// bot verification instead of a bearer token.
fn callable_router() -> Router {
    Router::new()
        .push(Router::with_path("verifyRecaptcha").post(callable::verify_recaptcha::handler))
        .push(
            Router::with_path("registerUserWithRecaptcha")
                .post(callable::register_user::handler),
        )
        .push(Router::with_path("loginUserWithRecaptcha").post(callable::login_user::handler))
        .push(Router::with_path("sendWelcomeEmail").post(callable::send_welcome_email::handler))
        .push(
            Router::with_path("createWompiTransaction")
                .post(callable::create_transaction::handler),
        )
        .push(
            Router::with_path("checkWompiTransactionStatus")
                .post(callable::check_transaction_status::handler),
        )
}

/// Public catalog reads.
fn catalog_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(
            Router::with_path("{product}")
                .get(products::get::handler)
                .push(Router::with_path("reviews").get(reviews::index::handler)),
        )
}

/// Routes acting on behalf of the signed-in customer.
fn customer_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("products/{product}/reviews").post(reviews::create::handler))
        .push(
            Router::with_path("wishlist")
                .get(wishlist::index::handler)
                .push(Router::with_path("{product}").post(wishlist::toggle::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(cart::get::handler)
                .delete(cart::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(cart::items::handlers::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .delete(cart::items::handlers::delete::handler)
                                .push(
                                    Router::with_path("increase")
                                        .post(cart::items::handlers::increase::handler),
                                )
                                .push(
                                    Router::with_path("decrease")
                                        .post(cart::items::handlers::decrease::handler),
                                ),
                        ),
                ),
        )
}

/// Catalog management, restricted to `ADMIN_EMAILS`.
fn admin_router() -> Router {
    Router::with_path("products")
        .hoop(auth::middleware::handler)
        .hoop(auth::admin_guard)
        .post(products::create::handler)
        .push(
            Router::with_path("{product}")
                .delete(products::delete::handler)
                .push(Router::with_path("stock").put(products::stock::handler)),
        )
}
