//! Discount code DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::JobId;
use domain_fees::{DiscountCode, DiscountCodeUpdate, NewDiscountCode};

use super::{double_option, validate_fee_amount};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDiscountCodeRequest {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(custom(function = "validate_fee_amount"))]
    pub value: Decimal,
    pub is_percentage: bool,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub max_uses: Option<u32>,
}

impl From<CreateDiscountCodeRequest> for NewDiscountCode {
    fn from(req: CreateDiscountCodeRequest) -> Self {
        NewDiscountCode {
            code: req.code,
            value: req.value,
            is_percentage: req.is_percentage,
            valid_from: req.valid_from,
            valid_until: req.valid_until,
            max_uses: req.max_uses,
        }
    }
}

/// Partial update; send `null` to clear a date or the usage limit
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDiscountCodeRequest {
    #[validate(custom(function = "validate_fee_amount"))]
    pub value: Option<Decimal>,
    pub is_percentage: Option<bool>,
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub valid_from: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub valid_until: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_uses: Option<Option<u32>>,
}

impl From<UpdateDiscountCodeRequest> for DiscountCodeUpdate {
    fn from(req: UpdateDiscountCodeRequest) -> Self {
        DiscountCodeUpdate {
            value: req.value,
            is_percentage: req.is_percentage,
            active: req.active,
            valid_from: req.valid_from,
            valid_until: req.valid_until,
            max_uses: req.max_uses,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateCodesRequest {
    #[validate(length(min = 1, max = 25))]
    pub prefix: String,
    #[validate(range(min = 1, max = 500))]
    pub count: u32,
    #[validate(custom(function = "validate_fee_amount"))]
    pub value: Decimal,
    pub is_percentage: bool,
}

#[derive(Debug, Serialize)]
pub struct DiscountCodeListResponse {
    pub job_id: JobId,
    pub codes: Vec<DiscountCode>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyCodeRequest {
    #[validate(custom(function = "validate_fee_amount"))]
    pub base_amount: Decimal,
    /// Redemption date; today when omitted
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ApplyCodeResponse {
    pub code: String,
    pub discount: Decimal,
    pub discounted_amount: Decimal,
    pub remaining_uses: Option<u32>,
}
