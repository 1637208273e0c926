//! Cart
//!
//! A cart holds at most one line per product. Each line keeps the product
//! snapshot taken when it was first added plus a quantity of at least one.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    pricing::{self, PricingError},
    products::{Product, ProductId},
};

/// Errors raised by cart mutations. A failed mutation leaves the cart unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity would exceed the recorded stock.
    #[error("only {stock} units of {name} are available")]
    StockExceeded {
        /// Product that ran out
        product_id: ProductId,
        /// Product display name
        name: String,
        /// Units available
        stock: u32,
    },

    /// The product has no line in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Quantities must be at least one and fit a `u32`.
    #[error("quantity must be between 1 and {}", u32::MAX)]
    InvalidQuantity,
}

impl CartError {
    /// Notice shown to the user for this rejection, if any.
    #[must_use]
    pub fn notice(&self) -> Option<CartNotice> {
        match self {
            Self::StockExceeded {
                product_id,
                name,
                stock,
            } => Some(CartNotice::StockExceeded {
                product_id: product_id.clone(),
                name: name.clone(),
                stock: *stock,
            }),
            Self::NotInCart(_) | Self::InvalidQuantity => None,
        }
    }
}

/// Description of the last change, used for toast-style notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartNotice {
    /// A product was added or its quantity went up.
    Added {
        /// Product identifier
        product_id: ProductId,
        /// Product display name
        name: String,
        /// Quantity after the change
        quantity: u32,
    },

    /// A product's quantity went down.
    Decreased {
        /// Product identifier
        product_id: ProductId,
        /// Product display name
        name: String,
        /// Quantity after the change
        quantity: u32,
    },

    /// A product line was removed.
    Removed {
        /// Product identifier
        product_id: ProductId,
        /// Product display name
        name: String,
    },

    /// The cart was emptied.
    Cleared,

    /// A change was rejected because of stock.
    StockExceeded {
        /// Product identifier
        product_id: ProductId,
        /// Product display name
        name: String,
        /// Units available
        stock: u32,
    },
}

impl CartNotice {
    /// Human-readable notification text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Added { name, quantity, .. } if *quantity > 1 => {
                format!("{name} added to cart (x{quantity})")
            }
            Self::Added { name, .. } => format!("{name} added to cart"),
            Self::Decreased { name, quantity, .. } => {
                format!("{name} quantity reduced to {quantity}")
            }
            Self::Removed { name, .. } => format!("{name} removed from cart"),
            Self::Cleared => "Cart cleared".to_string(),
            Self::StockExceeded { name, .. } => format!("No more stock available for {name}"),
        }
    }
}

/// Cart line: a product snapshot and a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product snapshot
    #[serde(flatten)]
    pub product: Product,

    /// Units in the cart, always at least one
    pub quantity: u32,
}

impl CartItem {
    /// Discounted line total.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] when the total cannot be represented.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        pricing::line_total(self.product.price, self.product.discount, self.quantity)
    }

    fn notice_added(&self) -> CartNotice {
        CartNotice::Added {
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            quantity: self.quantity,
        }
    }

    fn stock_exceeded(&self, stock: u32) -> CartError {
        CartError::StockExceeded {
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            stock,
        }
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines. Duplicate products are folded into the
    /// first line and zero-quantity lines are dropped.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();

        for item in items.into_iter().filter(|item| item.quantity > 0) {
            match cart.position(&item.product.id) {
                Some(index) => {
                    if let Some(existing) = cart.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => cart.items.push(item),
            }
        }

        cart
    }

    /// Lines in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    /// Quantity of a product, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.get(product_id).map_or(0, |item| item.quantity)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Add `quantity` units of `product`.
    ///
    /// The stock check uses the product passed in, which callers should read
    /// fresh from the catalog.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero or the line would overflow.
    /// - [`CartError::StockExceeded`]: the resulting quantity exceeds `product.stock`.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<CartNotice, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let requested = self
            .quantity_of(&product.id)
            .checked_add(quantity)
            .ok_or(CartError::InvalidQuantity)?;

        if let Some(stock) = product.stock
            && requested > stock
        {
            return Err(CartError::StockExceeded {
                product_id: product.id.clone(),
                name: product.name.clone(),
                stock,
            });
        }

        if let Some(item) = self.get_mut(&product.id) {
            item.quantity = requested;

            return Ok(item.notice_added());
        }

        let item = CartItem {
            product: product.clone(),
            quantity,
        };
        let notice = item.notice_added();

        self.items.push(item);

        Ok(notice)
    }

    /// Increase a line by one unit, checking the snapshot's stock.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotInCart`]: the product has no line.
    /// - [`CartError::StockExceeded`]: the line is already at the recorded stock.
    /// - [`CartError::InvalidQuantity`]: the line is already at `u32::MAX`.
    pub fn increase(&mut self, product_id: &ProductId) -> Result<CartNotice, CartError> {
        let item = self
            .get_mut(product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.clone()))?;

        if let Some(stock) = item.product.stock
            && item.quantity >= stock
        {
            return Err(item.stock_exceeded(stock));
        }

        item.quantity = item
            .quantity
            .checked_add(1)
            .ok_or(CartError::InvalidQuantity)?;

        Ok(item.notice_added())
    }

    /// Decrease a line by one unit; a line at quantity one is removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] when the product has no line.
    pub fn decrease(&mut self, product_id: &ProductId) -> Result<CartNotice, CartError> {
        let index = self
            .position(product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.clone()))?;

        let Some(item) = self.items.get_mut(index) else {
            return Err(CartError::NotInCart(product_id.clone()));
        };

        if item.quantity > 1 {
            item.quantity -= 1;

            return Ok(CartNotice::Decreased {
                product_id: item.product.id.clone(),
                name: item.product.name.clone(),
                quantity: item.quantity,
            });
        }

        let removed = self.items.remove(index);

        Ok(CartNotice::Removed {
            product_id: removed.product.id,
            name: removed.product.name,
        })
    }

    /// Remove a product line entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] when the product has no line.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<CartNotice, CartError> {
        let index = self
            .position(product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.clone()))?;

        let removed = self.items.remove(index);

        Ok(CartNotice::Removed {
            product_id: removed.product.id,
            name: removed.product.name,
        })
    }

    /// Remove every line.
    pub fn clear(&mut self) -> CartNotice {
        self.items.clear();

        CartNotice::Cleared
    }

    /// Fold another cart into this one. Lines only present in `other` are
    /// appended; lines present in both keep the larger quantity.
    pub fn merge(&mut self, other: Cart) {
        for incoming in other.items {
            match self.get_mut(&incoming.product.id) {
                Some(existing) => existing.quantity = existing.quantity.max(incoming.quantity),
                None => self.items.push(incoming),
            }
        }
    }

    /// Discounted subtotal across all lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] when the subtotal cannot be represented.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        pricing::subtotal(self.items.iter().map(CartItem::total))
    }

    /// Subtotal in the currency's minor units, as charged by the payment gateway.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] when the amount cannot be represented.
    pub fn total_in_minor_units(&self, currency: &Currency) -> Result<i64, PricingError> {
        pricing::to_minor_units(self.subtotal()?, currency)
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product.id == product_id)
    }

    fn get_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product.id == product_id)
    }
}
