use std::{path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use storefront::{cart::Cart, pricing::format_price};
use storefront_app::{
    context::{self, DocumentBackend},
    documents::DocumentStore,
    domain::products::DocumentProductsService,
    local_storage::FileLocalStorage,
};

mod cart;
mod product;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(product::ProductCommand),
    Cart(cart::CartCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Product(command) => product::run(command).await,
            Commands::Cart(command) => cart::run(command).await,
        }
    }
}

/// Catalog connection shared by commands that read or edit products.
#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl CatalogArgs {
    pub(crate) async fn documents(&self) -> Result<Arc<dyn DocumentStore>, String> {
        context::open_documents(&DocumentBackend::Postgres {
            url: self.database_url.clone(),
        })
        .await
        .map_err(|error| format!("failed to open catalog: {error}"))
    }

    pub(crate) async fn connect(&self) -> Result<DocumentProductsService, String> {
        Ok(DocumentProductsService::new(self.documents().await?))
    }
}

/// Directory standing in for one device's local storage.
#[derive(Debug, Args)]
pub(crate) struct DeviceArgs {
    /// Device storage directory
    #[arg(long, env = "STOREFRONT_STORAGE_DIR", default_value = ".storefront")]
    storage_dir: PathBuf,
}

impl DeviceArgs {
    pub(crate) async fn open(&self) -> Result<Arc<FileLocalStorage>, String> {
        FileLocalStorage::open(&self.storage_dir)
            .await
            .map(Arc::new)
            .map_err(|error| {
                format!(
                    "failed to open device storage at {}: {error}",
                    self.storage_dir.display()
                )
            })
    }
}

pub(crate) fn print_cart(cart: &Cart) -> Result<(), String> {
    if cart.is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    for item in cart.items() {
        let total = item.total().map_err(|error| error.to_string())?;

        println!(
            "{}  {} x{}  ${}",
            item.product.id,
            item.product.name,
            item.quantity,
            format_price(total)
        );
    }

    let subtotal = cart.subtotal().map_err(|error| error.to_string())?;

    println!("subtotal: ${}", format_price(subtotal));

    Ok(())
}
