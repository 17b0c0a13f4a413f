//! Team registration fees
//!
//! A team pays an agegroup deposit when it registers and the remaining
//! balance once the job switches to full payment. Club reps may pay by
//! card, which can carry a processing surcharge, or by check.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{ensure_fee_amount, MoneyError};

use crate::error::FeeError;
use crate::processing::{FeeBreakdown, PaymentMethod, ProcessingFeePolicy};

/// Everything needed to (re)compute a team's fees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamFeeInput {
    /// Agegroup deposit due at registration
    pub deposit: Decimal,
    /// Agegroup balance due in the full-payment phase
    pub balance_due: Decimal,
    /// True once the job charges the full team fee, not just the deposit
    pub charge_full_amount: bool,
    /// Discount amount already computed for this team
    pub discount: Decimal,
    pub processing: ProcessingFeePolicy,
    pub payment_method: PaymentMethod,
    /// Total the team has paid so far
    pub paid_total: Decimal,
    /// Fee total the team currently carries, before this recalculation
    pub current_fee_total: Decimal,
}

impl TeamFeeInput {
    /// Input for a team that is registering now and has paid nothing
    ///
    /// The current fee total is the discounted base so that a team with a
    /// non-zero fee is surcharged and a free team is not.
    pub fn new_registration(
        deposit: Decimal,
        balance_due: Decimal,
        charge_full_amount: bool,
        discount: Decimal,
        processing: ProcessingFeePolicy,
        payment_method: PaymentMethod,
    ) -> Result<Self, FeeError> {
        let fee_base = TeamFeeCalculator::fee_base(deposit, balance_due, charge_full_amount)?;
        let fee_discount = discount.max(Decimal::ZERO).min(fee_base);

        Ok(Self {
            deposit,
            balance_due,
            charge_full_amount,
            discount,
            processing,
            payment_method,
            paid_total: Decimal::ZERO,
            current_fee_total: fee_base - fee_discount,
        })
    }

    /// Rejects amounts past [`core_kernel::MAX_FEE_AMOUNT`]
    pub fn validate(&self) -> Result<(), FeeError> {
        for amount in [
            self.deposit,
            self.balance_due,
            self.discount,
            self.paid_total,
            self.current_fee_total,
        ] {
            ensure_fee_amount(amount)?;
        }
        Ok(())
    }
}

/// Stateless team fee arithmetic
pub struct TeamFeeCalculator;

impl TeamFeeCalculator {
    /// Deposit, plus the balance once the full amount is charged
    pub fn fee_base(
        deposit: Decimal,
        balance_due: Decimal,
        charge_full_amount: bool,
    ) -> Result<Decimal, FeeError> {
        let deposit = deposit.max(Decimal::ZERO);
        if !charge_full_amount {
            return Ok(deposit);
        }
        deposit
            .checked_add(balance_due.max(Decimal::ZERO))
            .ok_or_else(|| {
                FeeError::Money(MoneyError::Overflow(format!("{} + {}", deposit, balance_due)))
            })
    }

    /// Computes the full fee breakdown for a team
    ///
    /// A team that has already paid at least its current fee total is
    /// never surcharged, whatever the job's processing settings say.
    pub fn calculate_team_fees(input: &TeamFeeInput) -> Result<FeeBreakdown, FeeError> {
        input.validate()?;
        let fee_base = Self::fee_base(input.deposit, input.balance_due, input.charge_full_amount)?;
        let fee_discount = input.discount.max(Decimal::ZERO).min(fee_base);

        let fee_processing = if input.paid_total >= input.current_fee_total {
            debug!(
                paid = %input.paid_total,
                current = %input.current_fee_total,
                "team already paid in full, no processing fee"
            );
            Decimal::ZERO
        } else {
            let chargeable = fee_base - fee_discount - input.paid_total;
            input
                .processing
                .surcharge(chargeable, input.payment_method, !input.charge_full_amount)?
        };

        FeeBreakdown::assemble(fee_base, fee_discount, fee_processing, input.paid_total)
    }

    /// Processing fee to credit back when a team moves off card payment
    pub fn processing_fee_credit(fees: &FeeBreakdown, new_method: PaymentMethod) -> Decimal {
        if new_method.carries_processing_fee() {
            Decimal::ZERO
        } else {
            fees.fee_processing
        }
    }
}
