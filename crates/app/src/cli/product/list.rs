use clap::Args;
use storefront::pricing::format_price;
use storefront_app::domain::products::{ProductsService, models::ProductQuery};

use crate::cli::CatalogArgs;

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Only products in this category
    #[arg(long, conflicts_with_all = ["search", "offers", "top_selling"])]
    category: Option<String>,

    /// Keyword search over product names
    #[arg(long, conflicts_with_all = ["offers", "top_selling"])]
    search: Option<String>,

    /// Only discounted products
    #[arg(long, conflicts_with = "top_selling")]
    offers: bool,

    /// Best sellers, at most this many
    #[arg(long)]
    top_selling: Option<usize>,
}

impl ListProductsArgs {
    fn query(&self) -> ProductQuery {
        if let Some(category) = &self.category {
            ProductQuery::Category(category.clone())
        } else if let Some(term) = &self.search {
            ProductQuery::Search(term.clone())
        } else if self.offers {
            ProductQuery::Offers
        } else if let Some(limit) = self.top_selling {
            ProductQuery::TopSelling(limit)
        } else {
            ProductQuery::All
        }
    }
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let service = args.catalog.connect().await?;

    let products = service
        .list_products(args.query())
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for product in products {
        let stock = product
            .stock
            .map_or_else(|| "untracked".to_string(), |stock| stock.to_string());

        println!(
            "{}  {}  ${}  stock: {stock}",
            product.id,
            product.name,
            format_price(product.discounted_price())
        );
    }

    Ok(())
}
