//! Membership verification DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_registration::{MembershipRequest, MembershipVerdict};

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyMembershipRequest {
    #[validate(length(min = 1, max = 32))]
    pub member_id: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub birth_date: NaiveDate,
    /// Date the membership must still be valid on, usually the last game day
    pub required_through: NaiveDate,
}

impl From<VerifyMembershipRequest> for MembershipRequest {
    fn from(req: VerifyMembershipRequest) -> Self {
        MembershipRequest {
            member_id: req.member_id,
            last_name: req.last_name,
            birth_date: req.birth_date,
            required_through: req.required_through,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyMembershipResponse {
    pub member_id: String,
    pub valid: bool,
    #[serde(flatten)]
    pub verdict: MembershipVerdict,
}
