//! Credit-card processing surcharges and the fee breakdown they feed into

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{round_money, MoneyError, Rate};

use crate::error::FeeError;

/// How a registration is being paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Check,
    ECheck,
}

impl PaymentMethod {
    /// Only card payments carry a processing surcharge
    pub fn carries_processing_fee(&self) -> bool {
        matches!(self, PaymentMethod::CreditCard)
    }
}

/// A job's settings for passing card processing costs on to registrants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessingFeePolicy {
    /// Whether the job adds processing fees at all
    pub add_processing_fees: bool,
    /// Surcharge applied to the unpaid, discounted amount
    pub rate: Rate,
    /// Whether deposits collected before the full-payment phase are surcharged
    pub apply_to_deposit: bool,
}

impl ProcessingFeePolicy {
    /// A policy that surcharges card payments at `percentage` percent
    pub fn card_surcharge(percentage: Decimal) -> Self {
        Self {
            add_processing_fees: true,
            rate: Rate::from_percentage(percentage),
            apply_to_deposit: true,
        }
    }

    /// A policy that never surcharges
    pub fn none() -> Self {
        Self::default()
    }

    /// Surcharge on `chargeable`, or zero when the policy does not apply
    pub fn surcharge(
        &self,
        chargeable: Decimal,
        method: PaymentMethod,
        deposit_phase: bool,
    ) -> Result<Decimal, FeeError> {
        if !self.add_processing_fees || !method.carries_processing_fee() {
            return Ok(Decimal::ZERO);
        }
        if deposit_phase && !self.apply_to_deposit {
            return Ok(Decimal::ZERO);
        }
        Ok(self.rate.apply_decimal(chargeable.max(Decimal::ZERO))?)
    }
}

/// The computed fee fields stored on a team or player registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub fee_base: Decimal,
    pub fee_discount: Decimal,
    pub fee_processing: Decimal,
    pub fee_total: Decimal,
    pub owed_total: Decimal,
}

impl FeeBreakdown {
    /// Assembles a breakdown from its parts, deriving the totals
    pub(crate) fn assemble(
        fee_base: Decimal,
        fee_discount: Decimal,
        fee_processing: Decimal,
        paid_total: Decimal,
    ) -> Result<Self, FeeError> {
        let overflow = || MoneyError::Overflow(format!("fee total for base {}", fee_base));
        let fee_total = fee_base
            .checked_sub(fee_discount)
            .and_then(|net| net.checked_add(fee_processing))
            .map(round_money)
            .ok_or_else(overflow)?;
        let owed_total = fee_total
            .checked_sub(paid_total)
            .ok_or_else(overflow)?
            .max(Decimal::ZERO);

        Ok(Self {
            fee_base,
            fee_discount,
            fee_processing,
            fee_total,
            owed_total,
        })
    }

    /// Fee after the discount, before any processing surcharge
    pub fn net_of_discount(&self) -> Decimal {
        self.fee_base - self.fee_discount
    }

    pub fn is_paid_in_full(&self) -> bool {
        self.owed_total.is_zero()
    }
}
