use std::sync::Arc;

use clap::{Args, Subcommand};
use storefront::products::ProductId;
use storefront_app::{
    documents::{DocumentStore, MemoryDocumentStore},
    domain::{
        carts::CartSynchronizer,
        products::{DocumentProductsService, ProductsService},
    },
};

use crate::cli::{CatalogArgs, DeviceArgs, print_cart};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the guest cart
    Show(DeviceArgs),
    /// Add units of a catalog product
    Add(AddItemArgs),
    /// Take one unit off a line
    Decrease(LineArgs),
    /// Remove a line
    Remove(LineArgs),
    /// Empty the cart
    Clear(DeviceArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AddItemArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    device: DeviceArgs,

    /// Product identifier
    product: String,

    /// Units to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
pub(crate) struct LineArgs {
    #[command(flatten)]
    device: DeviceArgs,

    /// Product identifier
    product: String,
}

async fn guest_cart(
    device: &DeviceArgs,
    documents: Arc<dyn DocumentStore>,
) -> Result<CartSynchronizer, String> {
    let storage = device.open().await?;

    CartSynchronizer::mount(None, storage, documents)
        .await
        .map_err(|error| format!("failed to load cart: {error}"))
}

fn offline() -> Arc<dyn DocumentStore> {
    Arc::new(MemoryDocumentStore::new())
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show(device) => {
            let sync = guest_cart(&device, offline()).await?;

            print_cart(sync.cart())?;
        }
        CartSubcommand::Add(args) => {
            let id = ProductId::new(args.product).map_err(|error| error.to_string())?;
            let documents = args.catalog.documents().await?;

            let product = DocumentProductsService::new(documents.clone())
                .get_product(&id)
                .await
                .map_err(|error| format!("failed to load product {id}: {error}"))?;

            let mut sync = guest_cart(&args.device, documents).await?;
            let change = sync
                .add(&product, args.quantity)
                .await
                .map_err(|error| error.to_string())?;

            println!("{}", change.notice.message());
            print_cart(&change.cart)?;
        }
        CartSubcommand::Decrease(args) => {
            let id = ProductId::new(args.product).map_err(|error| error.to_string())?;
            let mut sync = guest_cart(&args.device, offline()).await?;
            let change = sync.decrease(&id).await.map_err(|error| error.to_string())?;

            println!("{}", change.notice.message());
            print_cart(&change.cart)?;
        }
        CartSubcommand::Remove(args) => {
            let id = ProductId::new(args.product).map_err(|error| error.to_string())?;
            let mut sync = guest_cart(&args.device, offline()).await?;
            let change = sync.remove(&id).await.map_err(|error| error.to_string())?;

            println!("{}", change.notice.message());
        }
        CartSubcommand::Clear(device) => {
            let mut sync = guest_cart(&device, offline()).await?;
            let change = sync.clear().await.map_err(|error| error.to_string())?;

            println!("{}", change.notice.message());
        }
    }

    Ok(())
}
