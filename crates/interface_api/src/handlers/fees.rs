//! Fee calculation handlers
//!
//! Stateless: every input the arithmetic needs travels in the request.

use axum::Json;
use validator::Validate;

use domain_fees::{
    DiscountCalculator, FeeBreakdown, InsurableAmountCalculator, PlayerFeeCalculator,
    PlayerFeeInput, TeamFeeCalculator, TeamFeeInput,
};

use crate::dto::fees::*;
use crate::error::ApiError;

/// Computes a percentage or fixed discount on an amount
pub async fn calculate_discount(
    Json(request): Json<DiscountRequest>,
) -> Result<Json<DiscountResponse>, ApiError> {
    request.validate()?;

    let discount = DiscountCalculator::calculate(
        request.base_amount,
        request.discount_value,
        request.is_percentage,
    );

    Ok(Json(DiscountResponse {
        discount,
        discounted_amount: request.base_amount - discount,
    }))
}

/// Computes a team's fee breakdown
pub async fn calculate_team_fees(
    Json(request): Json<TeamFeeRequest>,
) -> Result<Json<FeeBreakdown>, ApiError> {
    request.validate()?;
    let input = TeamFeeInput::try_from(&request)?;
    Ok(Json(TeamFeeCalculator::calculate_team_fees(&input)?))
}

/// Computes a player's fee breakdown
pub async fn calculate_player_fees(
    Json(request): Json<PlayerFeeRequest>,
) -> Result<Json<FeeBreakdown>, ApiError> {
    request.validate()?;
    let input = PlayerFeeInput::from(&request);
    Ok(Json(PlayerFeeCalculator::calculate(&input)?))
}

/// Amount eligible for registration insurance
pub async fn calculate_insurable(
    Json(request): Json<InsurableRequest>,
) -> Result<Json<InsurableResponse>, ApiError> {
    request.validate()?;

    Ok(Json(InsurableResponse {
        insurable_amount: InsurableAmountCalculator::calculate(
            request.fee_base,
            request.fee_discount,
            request.already_insured,
        ),
    }))
}
