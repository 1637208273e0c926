//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building product values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// Product identifiers cannot be blank.
    #[error("product id cannot be empty")]
    EmptyId,

    /// Discounts are percentages between 0 and 100.
    #[error("discount {0} is outside the 0-100 range")]
    DiscountOutOfRange(u8),
}

/// Product Identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::EmptyId`] when `id` is empty or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ProductError> {
        let id = id.into();

        if id.trim().is_empty() {
            return Err(ProductError::EmptyId);
        }

        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discount percentage in the inclusive range `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Discount(u8);

impl Discount {
    /// No discount.
    pub const NONE: Self = Self(0);

    /// Create a discount percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::DiscountOutOfRange`] for values above 100.
    pub const fn new(percent: u8) -> Result<Self, ProductError> {
        if percent > 100 {
            return Err(ProductError::DiscountOutOfRange(percent));
        }

        Ok(Self(percent))
    }

    /// Percentage value.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Whether any discount applies.
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.0 > 0
    }

    /// Fraction of the list price the customer still pays, e.g. `0.9` for 10%.
    #[must_use]
    pub fn remaining_fraction(self) -> Decimal {
        Decimal::from(100 - u32::from(self.0)) / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<u8> for Discount {
    type Error = ProductError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Discount> for u8 {
    fn from(value: Discount) -> Self {
        value.0
    }
}

/// Product
///
/// `price` is expressed in whole currency units. A `stock` of `None` means the
/// catalog does not track inventory for the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// List price in whole currency units
    pub price: u64,

    /// Optional image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Discount percentage
    #[serde(default)]
    pub discount: Discount,

    /// Cumulative units sold
    #[serde(default)]
    pub sales: u64,

    /// Units available, when tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,

    /// Optional coupon code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<String>,
}

impl Product {
    /// Unit price after the discount, without rounding.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        crate::pricing::discounted_unit_price(self.price, self.discount)
    }

    /// Whether the product is currently discounted.
    #[must_use]
    pub fn is_on_offer(&self) -> bool {
        self.discount.is_active()
    }

    /// Whether `quantity` units fit within the recorded stock.
    #[must_use]
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        self.stock.is_none_or(|stock| quantity <= stock)
    }

    /// Case-insensitive category comparison.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(category.trim()))
    }

    /// Keyword search: the term prefixes the name or equals one of its words.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();

        if term.is_empty() {
            return false;
        }

        let name = self.name.to_lowercase();

        name.starts_with(&term) || name.split_whitespace().any(|word| word == term)
    }

    /// Whether the lowercase name starts with `prefix`.
    #[must_use]
    pub fn name_starts_with(&self, prefix: &str) -> bool {
        let prefix = prefix.trim().to_lowercase();

        !prefix.is_empty() && self.name.to_lowercase().starts_with(&prefix)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::fixtures::product;

    use super::*;

    #[test]
    fn discount_rejects_values_above_one_hundred() {
        assert_eq!(Discount::new(101), Err(ProductError::DiscountOutOfRange(101)));
        assert!(Discount::new(100).is_ok());
    }

    #[test]
    fn zero_discount_keeps_list_price() -> TestResult {
        let product = product("gpu", 250_000, 0, Some(3))?;

        assert_eq!(product.discounted_price(), Decimal::from(250_000));

        Ok(())
    }

    #[test]
    fn discounted_price_applies_percentage() -> TestResult {
        let product = product("ssd", 100_000, 10, None)?;

        assert_eq!(product.discounted_price(), Decimal::from(90_000));

        Ok(())
    }

    #[test]
    fn product_id_rejects_blank_values() {
        assert_eq!(ProductId::new("  "), Err(ProductError::EmptyId));
    }

    #[test]
    fn untracked_stock_accepts_any_quantity() -> TestResult {
        let product = product("mouse", 50_000, 0, None)?;

        assert!(product.has_stock_for(u32::MAX));

        Ok(())
    }

    #[test]
    fn search_matches_prefix_and_words() -> TestResult {
        let mut product = product("ram", 180_000, 0, None)?;
        product.name = "Memoria RAM DDR5".to_string();

        assert!(product.matches_search("memo"));
        assert!(product.matches_search("ddr5"));
        assert!(!product.matches_search("dd"));
        assert!(!product.matches_search("   "));

        Ok(())
    }

    #[test]
    fn deserializes_sparse_documents() -> TestResult {
        let product: Product = serde_json::from_str(r#"{"id":"p1","name":"Cooler","price":90000}"#)?;

        assert_eq!(product.discount, Discount::NONE);
        assert_eq!(product.stock, None);
        assert_eq!(product.sales, 0);

        Ok(())
    }

    #[test]
    fn deserialization_rejects_out_of_range_discount() {
        let result = serde_json::from_str::<Product>(
            r#"{"id":"p1","name":"Cooler","price":90000,"discount":150}"#,
        );

        assert!(result.is_err(), "discount above 100 must not deserialize");
    }
}
