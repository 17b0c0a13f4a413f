//! Request/response data transfer objects

pub mod fees;
pub mod discount_codes;
pub mod scheduling;
pub mod clubs;
pub mod membership;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use core_kernel::MAX_FEE_AMOUNT;

pub(crate) fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Non-negative and no larger than [`MAX_FEE_AMOUNT`]
pub(crate) fn validate_fee_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    if *value > MAX_FEE_AMOUNT {
        let mut err = ValidationError::new("fee_amount");
        err.message = Some(format!("must not exceed {}", MAX_FEE_AMOUNT).into());
        return Err(err);
    }
    Ok(())
}

pub(crate) fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    if *value > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("percentage");
        err.message = Some("must be between 0 and 100".into());
        return Err(err);
    }
    Ok(())
}

/// Distinguishes an absent field from an explicit `null`
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// absent leaves `None`, `null` gives `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
