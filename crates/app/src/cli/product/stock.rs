use clap::Args;
use storefront::products::ProductId;
use storefront_app::domain::products::ProductsService;

use crate::cli::CatalogArgs;

#[derive(Debug, Args)]
pub(crate) struct UpdateStockArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Product identifier
    product: String,

    /// Units in stock
    #[arg(long, required_unless_present = "untracked")]
    stock: Option<u32>,

    /// Stop tracking inventory for the product
    #[arg(long, conflicts_with = "stock")]
    untracked: bool,
}

pub(crate) async fn run(args: UpdateStockArgs) -> Result<(), String> {
    let id = ProductId::new(args.product).map_err(|error| error.to_string())?;
    let service = args.catalog.connect().await?;

    let stock = if args.untracked { None } else { args.stock };

    let product = service
        .update_stock(&id, stock)
        .await
        .map_err(|error| format!("failed to update stock for {id}: {error}"))?;

    println!(
        "stock: {}",
        product
            .stock
            .map_or_else(|| "untracked".to_string(), |stock| stock.to_string())
    );

    Ok(())
}
