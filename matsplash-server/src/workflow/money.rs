//! Money arithmetic
//!
//! Amounts are `f64` on the wire and in SQLite; every calculation goes
//! through `Decimal` and is rounded back to two places.

use rust_decimal::prelude::*;
use shared::models::{PRICE_PREMIUM, PRICE_STANDARD};

const DECIMAL_PLACES: u32 = 2;

/// Tolerance for comparing a submitted amount with a computed one (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Upper bound accepted for any submitted amount
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Finite, non-negative and below [`MAX_AMOUNT`]
pub fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && (0.0..=MAX_AMOUNT).contains(&value)
}

/// `bags × 250`, the revenue a dispatch is expected to bring back
pub fn expected_revenue(bags_dispatched: i64) -> f64 {
    to_f64(Decimal::from(bags_dispatched) * Decimal::from(PRICE_STANDARD))
}

/// `sold_270 × 270 + sold_250 × 250`
pub fn sales_revenue(sold_premium: i64, sold_standard: i64) -> f64 {
    to_f64(
        Decimal::from(sold_premium) * Decimal::from(PRICE_PREMIUM)
            + Decimal::from(sold_standard) * Decimal::from(PRICE_STANDARD),
    )
}

/// `bags × rate`, rounded to two places
pub fn earnings(bags: i64, rate_amount: f64) -> f64 {
    to_f64(Decimal::from(bags) * to_decimal(rate_amount))
}

/// Whether two amounts differ by more than one cent
pub fn differs(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() > MONEY_TOLERANCE
}
