//! Registration domain errors

use thiserror::Error;

use core_kernel::{CoreError, DivisionId};

/// Errors that can occur in the registration domain
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Division not found: {0}")]
    DivisionNotFound(DivisionId),

    /// A season date cannot be moved to the target year
    #[error("Cannot move {date} by {years} years")]
    DateOutOfRange {
        date: String,
        years: i32,
    },
}

/// Errors from a membership verification adapter
///
/// These never fail a registration; the verifier degrades to
/// an unavailable verdict instead.
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("Membership service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Membership service returned HTTP {status}")]
    Http {
        status: u16,
    },

    #[error("Membership service is not configured: {0}")]
    Configuration(String),
}
