//! Fees domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur in the fees domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeeError {
    /// Code text is empty, too long or has characters outside `[A-Z0-9_-]`
    #[error("Invalid discount code: {0}")]
    InvalidCode(String),

    /// A code with the same text already exists for the job
    #[error("Discount code already exists: {0}")]
    DuplicateCode(String),

    #[error("Discount code not found: {0}")]
    CodeNotFound(String),

    #[error("Discount code {0} is inactive")]
    Inactive(String),

    #[error("Discount code {code} is not valid until {valid_from}")]
    NotYetValid {
        code: String,
        valid_from: NaiveDate,
    },

    #[error("Discount code {code} expired on {valid_until}")]
    Expired {
        code: String,
        valid_until: NaiveDate,
    },

    #[error("Discount code {code} has reached its limit of {max_uses} uses")]
    UsageLimitReached {
        code: String,
        max_uses: u32,
    },

    /// Discount value outside the allowed range
    #[error("Invalid discount value: {0}")]
    InvalidValue(String),

    /// A fee amount is out of range or the arithmetic on it overflowed
    #[error(transparent)]
    Money(#[from] MoneyError),
}
