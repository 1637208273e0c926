//! Pricing

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::products::Discount;

/// Currency every storefront price is expressed in.
pub const STORE_CURRENCY: &Currency = iso::COP;

/// Errors that can occur while converting prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The amount does not fit the target representation.
    #[error("amount overflowed")]
    Overflow,

    /// Amounts charged to customers cannot be negative.
    #[error("amount cannot be negative")]
    Negative,
}

/// Unit price after applying a percentage discount, kept exact.
#[must_use]
pub fn discounted_unit_price(price: u64, discount: Discount) -> Decimal {
    Decimal::from(price) * discount.remaining_fraction()
}

/// Discounted unit price multiplied by a quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the total exceeds the decimal range.
pub fn line_total(
    price: u64,
    discount: Discount,
    quantity: u32,
) -> Result<Decimal, PricingError> {
    discounted_unit_price(price, discount)
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Sum a sequence of line totals.
///
/// # Errors
///
/// Returns the first line error, or [`PricingError::Overflow`] when the sum
/// exceeds the decimal range.
pub fn subtotal(
    lines: impl IntoIterator<Item = Result<Decimal, PricingError>>,
) -> Result<Decimal, PricingError> {
    lines.into_iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line?).ok_or(PricingError::Overflow)
    })
}

/// Round an amount to whole currency units for display.
#[must_use]
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount the way the storefront displays prices: whole units,
/// `.` as the thousands separator.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = round_for_display(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }

        grouped.push(digit);
    }

    if negative {
        grouped.insert(0, '-');
    }

    grouped
}

/// Convert a whole-unit amount into the currency's minor units, rounding half
/// away from zero (e.g. pesos to cents for the payment gateway).
///
/// # Errors
///
/// - [`PricingError::Negative`]: the amount is below zero.
/// - [`PricingError::Overflow`]: the scaled amount does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal, currency: &Currency) -> Result<i64, PricingError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PricingError::Negative);
    }

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .and_then(Decimal::from_i64)
        .ok_or(PricingError::Overflow)?;

    amount
        .checked_mul(scale)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|scaled| scaled.to_i64())
        .ok_or(PricingError::Overflow)
}
