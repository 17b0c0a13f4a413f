//! Insurable amounts for registration cancellation insurance
//!
//! Registrants may insure what they pay for a registration. Processing
//! surcharges are never refundable and are therefore never insured.

use rust_decimal::Decimal;

use core_kernel::{round_money, Money};

use crate::error::FeeError;
use crate::processing::FeeBreakdown;

/// Stateless insurable-amount arithmetic
pub struct InsurableAmountCalculator;

impl InsurableAmountCalculator {
    /// Insurable portion of a fee
    ///
    /// Zero when a policy was already purchased for the registration.
    pub fn calculate(fee_base: Decimal, fee_discount: Decimal, already_insured: bool) -> Decimal {
        if already_insured {
            return Decimal::ZERO;
        }
        let base = fee_base.max(Decimal::ZERO);
        let discount = fee_discount.max(Decimal::ZERO).min(base);
        round_money(base - discount)
    }

    pub fn for_breakdown(fees: &FeeBreakdown, already_insured: bool) -> Decimal {
        Self::calculate(fees.fee_base, fees.fee_discount, already_insured)
    }

    /// Insurable amount for the players on a roster who have not bought cover
    pub fn for_roster(
        per_player: &Money,
        roster_size: u32,
        already_insured_count: u32,
    ) -> Result<Money, FeeError> {
        let uninsured = roster_size.saturating_sub(already_insured_count);
        let total = per_player
            .clamp_non_negative()
            .checked_multiply(Decimal::from(uninsured))?;
        Ok(total.round_to_currency())
    }
}
