//! Player registration fees

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ensure_fee_amount;

use crate::error::FeeError;
use crate::processing::{FeeBreakdown, PaymentMethod, ProcessingFeePolicy};

/// Inputs for a single player's registration fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFeeInput {
    /// Agegroup player fee
    pub base: Decimal,
    pub discount: Decimal,
    pub processing: ProcessingFeePolicy,
    pub payment_method: PaymentMethod,
    pub paid_total: Decimal,
}

/// Stateless player fee arithmetic
///
/// Players always pay the full fee, so there is no deposit phase.
pub struct PlayerFeeCalculator;

impl PlayerFeeCalculator {
    pub fn calculate(input: &PlayerFeeInput) -> Result<FeeBreakdown, FeeError> {
        for amount in [input.base, input.discount, input.paid_total] {
            ensure_fee_amount(amount)?;
        }

        let fee_base = input.base.max(Decimal::ZERO);
        let fee_discount = input.discount.max(Decimal::ZERO).min(fee_base);
        let current_fee_total = fee_base - fee_discount;

        let fee_processing = if input.paid_total >= current_fee_total {
            Decimal::ZERO
        } else {
            input.processing.surcharge(
                current_fee_total - input.paid_total,
                input.payment_method,
                false,
            )?
        };

        FeeBreakdown::assemble(fee_base, fee_discount, fee_processing, input.paid_total)
    }
}
