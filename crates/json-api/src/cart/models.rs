//! Cart Models

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use storefront::{
    cart::{Cart, CartItem, CartNotice},
    pricing::{PricingError, STORE_CURRENCY},
};
use storefront_app::domain::carts::CartChange;

use crate::{extensions::*, products::ProductResponse};

/// Cart line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// Product snapshot taken when the line was created
    pub product: ProductResponse,

    pub quantity: u32,

    /// Discounted line total in pesos
    pub total: String,
}

impl TryFrom<&CartItem> for CartItemResponse {
    type Error = PricingError;

    fn try_from(item: &CartItem) -> Result<Self, Self::Error> {
        Ok(CartItemResponse {
            total: item.total()?.normalize().to_string(),
            product: item.product.clone().into(),
            quantity: item.quantity,
        })
    }
}

/// Cart contents and totals
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,

    /// Discounted subtotal in pesos
    pub subtotal: String,

    /// Amount charged at checkout, in centavos
    pub total_in_cents: i64,
}

impl CartResponse {
    pub(crate) fn from_cart(cart: &Cart) -> Result<Self, StatusError> {
        Ok(CartResponse {
            items: cart
                .items()
                .iter()
                .map(CartItemResponse::try_from)
                .collect::<Result<Vec<_>, _>>()
                .or_500("failed to price cart lines")?,
            subtotal: cart
                .subtotal()
                .or_500("failed to price cart")?
                .normalize()
                .to_string(),
            total_in_cents: cart
                .total_in_minor_units(STORE_CURRENCY)
                .or_500("failed to price cart")?,
        })
    }
}

/// Notice describing the last change
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartNoticeResponse {
    /// `added`, `decreased`, `removed`, `cleared` or `stock_exceeded`
    pub kind: String,

    /// Text to display to the customer
    pub message: String,
}

impl From<&CartNotice> for CartNoticeResponse {
    fn from(notice: &CartNotice) -> Self {
        let kind = match notice {
            CartNotice::Added { .. } => "added",
            CartNotice::Decreased { .. } => "decreased",
            CartNotice::Removed { .. } => "removed",
            CartNotice::Cleared => "cleared",
            CartNotice::StockExceeded { .. } => "stock_exceeded",
        };

        CartNoticeResponse {
            kind: kind.to_string(),
            message: notice.message(),
        }
    }
}

/// Cart after a mutation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartChangeResponse {
    pub cart: CartResponse,
    pub notice: CartNoticeResponse,
}

impl CartChangeResponse {
    pub(crate) fn from_change(change: &CartChange) -> Result<Self, StatusError> {
        Ok(CartChangeResponse {
            cart: CartResponse::from_cart(&change.cart)?,
            notice: (&change.notice).into(),
        })
    }
}
