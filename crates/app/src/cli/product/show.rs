use clap::Args;
use storefront::{pricing::format_price, products::ProductId};
use storefront_app::{domain::products::ProductsService, local_storage::RecentlyViewed};

use crate::cli::{CatalogArgs, DeviceArgs};

#[derive(Debug, Args)]
pub(crate) struct ShowProductArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    device: DeviceArgs,

    /// Product identifier
    product: String,
}

pub(crate) async fn run(args: ShowProductArgs) -> Result<(), String> {
    let id = ProductId::new(args.product).map_err(|error| error.to_string())?;
    let service = args.catalog.connect().await?;

    let product = service
        .get_product(&id)
        .await
        .map_err(|error| format!("failed to load product {id}: {error}"))?;

    let storage = args.device.open().await?;
    RecentlyViewed::record_view(storage.as_ref(), product.id.clone())
        .await
        .map_err(|error| format!("failed to record view: {error}"))?;

    println!("product_id: {}", product.id);
    println!("name: {}", product.name);
    println!("price: ${}", format_price(product.price.into()));

    if product.is_on_offer() {
        println!("discount: {}%", product.discount.percent());
        println!("offer_price: ${}", format_price(product.discounted_price()));
    }

    if let Some(category) = &product.category {
        println!("category: {category}");
    }

    if let Some(description) = &product.description {
        println!("description: {description}");
    }

    println!(
        "stock: {}",
        product
            .stock
            .map_or_else(|| "untracked".to_string(), |stock| stock.to_string())
    );

    Ok(())
}
