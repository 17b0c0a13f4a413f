//! Membership verification handlers

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use domain_registration::{verify_member, MembershipRequest, MembershipVerdict};

use crate::dto::membership::*;
use crate::{error::ApiError, AppState};

/// Verifies a player's membership number against name, birth date and expiry
pub async fn verify_membership(
    State(state): State<AppState>,
    Json(request): Json<VerifyMembershipRequest>,
) -> Result<Json<VerifyMembershipResponse>, ApiError> {
    request.validate()?;
    let request = MembershipRequest::from(request);

    let verdict = match &state.membership {
        Some(verifier) => verify_member(verifier.as_ref(), &request).await,
        None => MembershipVerdict::Unavailable,
    };

    info!(member_id = %request.member_id, valid = verdict.is_valid(), "membership verified");

    Ok(Json(VerifyMembershipResponse {
        member_id: request.member_id,
        valid: verdict.is_valid(),
        verdict,
    }))
}
