use clap::Args;
use storefront_app::domain::products::{ProductsService, models::NewProduct};

use crate::cli::CatalogArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Display name
    #[arg(long)]
    name: String,

    /// List price in whole pesos
    #[arg(long)]
    price: u64,

    /// Category label
    #[arg(long)]
    category: Option<String>,

    /// Free-text description
    #[arg(long)]
    description: Option<String>,

    /// Image URL
    #[arg(long)]
    image: Option<String>,

    /// Discount percentage
    #[arg(long, default_value_t = 0)]
    discount: u8,

    /// Units sold so far
    #[arg(long, default_value_t = 0)]
    sales: u64,

    /// Units in stock; untracked when omitted
    #[arg(long)]
    stock: Option<u32>,

    /// Coupon code
    #[arg(long)]
    coupon: Option<String>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let service = args.catalog.connect().await?;

    let product = service
        .create_product(NewProduct {
            name: args.name,
            price: args.price,
            image: args.image,
            category: args.category,
            description: args.description,
            discount: args.discount,
            sales: args.sales,
            stock: args.stock,
            coupon: args.coupon,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("name: {}", product.name);

    Ok(())
}
