//! Club matching DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_registration::ClubMatch;

#[derive(Debug, Deserialize, Validate)]
pub struct ClubMatchRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 5000))]
    pub candidates: Vec<String>,
    /// Minimum similarity, 0-100; defaults to the duplicate threshold
    #[validate(range(max = 100))]
    pub threshold: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct ClubMatchResponse {
    pub normalized: String,
    pub likely_duplicate: bool,
    pub matches: Vec<ClubMatch>,
}
