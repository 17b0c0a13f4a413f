//! Club matching handlers

use axum::Json;
use validator::Validate;

use domain_registration::{ClubNameMatcher, DUPLICATE_THRESHOLD};

use crate::dto::clubs::*;
use crate::error::ApiError;

/// Ranks existing club names against one typed at registration
pub async fn match_club(
    Json(request): Json<ClubMatchRequest>,
) -> Result<Json<ClubMatchResponse>, ApiError> {
    request.validate()?;

    let threshold = request.threshold.unwrap_or(DUPLICATE_THRESHOLD);
    let matches = ClubNameMatcher::find_matches(&request.name, &request.candidates, threshold);
    let likely_duplicate = matches.iter().any(|m| m.score >= DUPLICATE_THRESHOLD);

    Ok(Json(ClubMatchResponse {
        normalized: ClubNameMatcher::normalize(&request.name),
        likely_duplicate,
        matches,
    }))
}
