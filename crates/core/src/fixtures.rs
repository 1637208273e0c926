//! Test fixtures

use crate::products::{Discount, Product, ProductError, ProductId};

/// Build a catalog product named after its identifier.
pub(crate) fn product(
    id: &str,
    price: u64,
    discount: u8,
    stock: Option<u32>,
) -> Result<Product, ProductError> {
    Ok(Product {
        id: ProductId::new(id)?,
        name: format!("Product {id}"),
        price,
        image: None,
        category: None,
        description: None,
        discount: Discount::new(discount)?,
        sales: 0,
        stock,
        coupon: None,
    })
}
