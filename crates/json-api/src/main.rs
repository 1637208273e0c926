//! Storefront JSON API Server
//!
//! Serves the catalog, reviews, wishlists and carts as REST resources, plus
//! the callable endpoints used for bot verification, accounts and checkout.

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use storefront_app::context::AppContext;
use tracing::{error, info};

use crate::{
    auth::AdminPolicy,
    config::ServerConfig,
    observability::{Observability, metrics_handler, request_logging},
    state::State,
};

mod auth;
mod callable;
mod cart;
mod config;
mod cors;
mod extensions;
mod healthcheck;
mod observability;
mod products;
mod reviews;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod wishlist;

/// Storefront JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    let observability = Observability::init(&config).unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "subscriber failed to install, nothing else can report this"
        )]
        {
            eprintln!("Observability error: {e}");
        }

        process::exit(1);
    });

    let app_config = match config.app_config() {
        Ok(app_config) => app_config,
        Err(config_error) => {
            error!("invalid application configuration: {config_error}");

            process::exit(1);
        }
    };

    let app = match AppContext::from_config(app_config).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!(
        wompi_public_key = %config.wompi.public_key,
        admins = config.access.admin_emails.len(),
        "starting server on {addr}"
    );

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let state = State::shared(app, AdminPolicy::new(&config.access.admin_emails));

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(request_logging)
        .hoop(inject(state))
        .push(router::app_router());

    let doc = OpenApi::new("Storefront API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let service = Service::new(router).hoop(cors::cors_handler(&config.access.cors_allowed_origins));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(service).await;

    observability.shutdown();
}
