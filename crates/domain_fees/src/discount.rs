//! Discount calculation
//!
//! A discount is either a percentage of the amount it reduces or a fixed
//! amount. Either way it can never take the amount below zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{round_money, Money};

/// Stateless discount arithmetic
pub struct DiscountCalculator;

impl DiscountCalculator {
    /// Calculates the discount to subtract from `base_amount`
    ///
    /// # Arguments
    ///
    /// * `base_amount` - The amount being discounted
    /// * `discount_value` - A percentage (`10` for 10%) or a fixed amount
    /// * `is_percentage` - Selects how `discount_value` is read
    ///
    /// # Returns
    ///
    /// A value in `[0, base_amount]`. Percentage discounts are rounded to
    /// cents before the cap is applied.
    pub fn calculate(base_amount: Decimal, discount_value: Decimal, is_percentage: bool) -> Decimal {
        if base_amount <= Decimal::ZERO || discount_value <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let discount = if is_percentage {
            // past 100% the whole base is taken, so the factor never exceeds one
            let factor = discount_value.min(dec!(100)) / dec!(100);
            base_amount
                .checked_mul(factor)
                .map(round_money)
                .unwrap_or(base_amount)
        } else {
            discount_value
        };

        discount.min(base_amount)
    }

    /// [`calculate`](Self::calculate) on a `Money` base, keeping its currency
    pub fn calculate_money(base: &Money, discount_value: Decimal, is_percentage: bool) -> Money {
        Money::new(
            Self::calculate(base.amount(), discount_value, is_percentage),
            base.currency(),
        )
    }

    /// Amount left after the discount is taken off
    pub fn discounted(base_amount: Decimal, discount_value: Decimal, is_percentage: bool) -> Decimal {
        let base = base_amount.max(Decimal::ZERO);
        base - Self::calculate(base, discount_value, is_percentage)
    }
}
