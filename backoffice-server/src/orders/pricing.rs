//! Order pricing in integer minor units
//!
//! Line totals use the caller-supplied unit price, never the live catalog
//! price. The order total is not clamped: an oversized discount yields a
//! negative total.

use shared::error::{AppError, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: i64,
    pub shipping: i64,
    pub tax: i64,
    pub discount: i64,
    pub total: i64,
}

fn overflow() -> AppError {
    AppError::with_message(ErrorCode::OrderInvalidAmount, "Order amount is too large")
}

/// `price × quantity`
pub fn line_total(price: i64, quantity: i64) -> Result<i64, AppError> {
    price.checked_mul(quantity).ok_or_else(overflow)
}

impl OrderTotals {
    /// `subtotal + shipping + tax - discount`, absent adjustments count as 0
    pub fn compute(
        line_totals: impl IntoIterator<Item = i64>,
        shipping: Option<i64>,
        tax: Option<i64>,
        discount: Option<i64>,
    ) -> Result<Self, AppError> {
        let subtotal = line_totals
            .into_iter()
            .try_fold(0_i64, |acc, t| acc.checked_add(t))
            .ok_or_else(overflow)?;
        let shipping = shipping.unwrap_or(0);
        let tax = tax.unwrap_or(0);
        let discount = discount.unwrap_or(0);

        let total = subtotal
            .checked_add(shipping)
            .and_then(|v| v.checked_add(tax))
            .and_then(|v| v.checked_sub(discount))
            .ok_or_else(overflow)?;

        Ok(Self {
            subtotal,
            shipping,
            tax,
            discount,
            total,
        })
    }
}
