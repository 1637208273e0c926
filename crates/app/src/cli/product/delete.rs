use clap::Args;
use storefront::products::ProductId;
use storefront_app::domain::products::ProductsService;

use crate::cli::CatalogArgs;

#[derive(Debug, Args)]
pub(crate) struct DeleteProductArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Product identifier
    product: String,
}

pub(crate) async fn run(args: DeleteProductArgs) -> Result<(), String> {
    let id = ProductId::new(args.product).map_err(|error| error.to_string())?;
    let service = args.catalog.connect().await?;

    service
        .delete_product(&id)
        .await
        .map_err(|error| format!("failed to delete product {id}: {error}"))?;

    println!("deleted: {id}");

    Ok(())
}
