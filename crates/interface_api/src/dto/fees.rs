//! Fee calculation DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_fees::{FeeError, PaymentMethod, PlayerFeeInput, ProcessingFeePolicy, TeamFeeInput};

use super::{validate_fee_amount, validate_percentage};

#[derive(Debug, Deserialize, Validate)]
pub struct DiscountRequest {
    #[validate(custom(function = "validate_fee_amount"))]
    pub base_amount: Decimal,
    #[validate(custom(function = "validate_fee_amount"))]
    pub discount_value: Decimal,
    pub is_percentage: bool,
}

#[derive(Debug, Serialize)]
pub struct DiscountResponse {
    pub discount: Decimal,
    pub discounted_amount: Decimal,
}

/// Job processing fee settings as sent by clients
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ProcessingRequest {
    pub add_processing_fees: bool,
    /// Surcharge percentage, e.g. `3.5`
    #[validate(custom(function = "validate_percentage"))]
    pub percentage: Decimal,
    #[serde(default = "default_true")]
    pub apply_to_deposit: bool,
}

fn default_true() -> bool {
    true
}

impl From<ProcessingRequest> for ProcessingFeePolicy {
    fn from(req: ProcessingRequest) -> Self {
        ProcessingFeePolicy {
            add_processing_fees: req.add_processing_fees,
            apply_to_deposit: req.apply_to_deposit,
            ..ProcessingFeePolicy::card_surcharge(req.percentage)
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TeamFeeRequest {
    #[validate(custom(function = "validate_fee_amount"))]
    pub deposit: Decimal,
    #[validate(custom(function = "validate_fee_amount"))]
    pub balance_due: Decimal,
    pub charge_full_amount: bool,
    #[serde(default)]
    #[validate(custom(function = "validate_fee_amount"))]
    pub discount: Decimal,
    #[validate(nested)]
    pub processing: Option<ProcessingRequest>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    #[validate(custom(function = "validate_fee_amount"))]
    pub paid_total: Decimal,
    /// Fee total carried before recalculating; omitted for new registrations
    #[validate(custom(function = "validate_fee_amount"))]
    pub current_fee_total: Option<Decimal>,
}

impl TryFrom<&TeamFeeRequest> for TeamFeeInput {
    type Error = FeeError;

    fn try_from(req: &TeamFeeRequest) -> Result<Self, Self::Error> {
        let processing = req.processing.map(ProcessingFeePolicy::from).unwrap_or_default();
        let mut input = TeamFeeInput::new_registration(
            req.deposit,
            req.balance_due,
            req.charge_full_amount,
            req.discount,
            processing,
            req.payment_method,
        )?;
        input.paid_total = req.paid_total;
        if let Some(current) = req.current_fee_total {
            input.current_fee_total = current;
        }
        Ok(input)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlayerFeeRequest {
    #[validate(custom(function = "validate_fee_amount"))]
    pub base: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validate_fee_amount"))]
    pub discount: Decimal,
    #[validate(nested)]
    pub processing: Option<ProcessingRequest>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    #[validate(custom(function = "validate_fee_amount"))]
    pub paid_total: Decimal,
}

impl From<&PlayerFeeRequest> for PlayerFeeInput {
    fn from(req: &PlayerFeeRequest) -> Self {
        PlayerFeeInput {
            base: req.base,
            discount: req.discount,
            processing: req.processing.map(ProcessingFeePolicy::from).unwrap_or_default(),
            payment_method: req.payment_method,
            paid_total: req.paid_total,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct InsurableRequest {
    #[validate(custom(function = "validate_fee_amount"))]
    pub fee_base: Decimal,
    #[serde(default)]
    #[validate(custom(function = "validate_fee_amount"))]
    pub fee_discount: Decimal,
    #[serde(default)]
    pub already_insured: bool,
}

#[derive(Debug, Serialize)]
pub struct InsurableResponse {
    pub insurable_amount: Decimal,
}
