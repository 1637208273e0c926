//! Product models

use serde::Deserialize;
use storefront::products::{Discount, Product, ProductId};

use crate::domain::products::errors::ProductsServiceError;

/// Maximum number of name suggestions returned while typing.
pub const SUGGESTION_LIMIT: usize = 5;

/// Catalog listing filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    /// Every product.
    All,

    /// Products in a category, compared case-insensitively.
    Category(String),

    /// Keyword search over product names.
    Search(String),

    /// Name-prefix suggestions, at most [`SUGGESTION_LIMIT`].
    Suggest(String),

    /// Discounted products.
    Offers,

    /// Best sellers, highest sales first.
    TopSelling(usize),
}

impl ProductQuery {
    pub(crate) fn apply(&self, mut products: Vec<Product>) -> Vec<Product> {
        match self {
            Self::All => products,
            Self::Category(category) => {
                products.retain(|product| product.in_category(category));
                products
            }
            Self::Search(term) => {
                products.retain(|product| product.matches_search(term));
                products
            }
            Self::Suggest(prefix) => products
                .into_iter()
                .filter(|product| product.name_starts_with(prefix))
                .take(SUGGESTION_LIMIT)
                .collect(),
            Self::Offers => {
                products.retain(Product::is_on_offer);
                products
            }
            Self::TopSelling(limit) => {
                products.sort_by(|a, b| b.sales.cmp(&a.sales));
                products.truncate(*limit);
                products
            }
        }
    }
}

/// Admin input for a new catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: u64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discount: u8,
    #[serde(default)]
    pub sales: u64,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub coupon: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl NewProduct {
    /// Validate the input and build the product stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidData`] for a blank name or a zero
    /// price, and [`ProductsServiceError::InvalidValue`] for an out-of-range discount.
    pub fn into_product(self, id: ProductId) -> Result<Product, ProductsServiceError> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(ProductsServiceError::InvalidData("name is required"));
        }

        if self.price == 0 {
            return Err(ProductsServiceError::InvalidData("price must be positive"));
        }

        Ok(Product {
            id,
            name: name.to_string(),
            price: self.price,
            image: non_blank(self.image),
            category: non_blank(self.category),
            description: non_blank(self.description),
            discount: Discount::new(self.discount)?,
            sales: self.sales,
            stock: self.stock,
            coupon: non_blank(self.coupon),
        })
    }
}
