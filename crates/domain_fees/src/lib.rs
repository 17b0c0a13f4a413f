//! Fees Domain - Registration Fee Arithmetic
//!
//! This crate holds the money rules for team and player registration:
//!
//! - **Discounts**: percentage or fixed-amount reductions, always capped
//!   at the amount they reduce
//! - **Discount codes**: per-job codes with validity windows and usage limits
//! - **Team and player fees**: base fee, discount, credit-card processing
//!   surcharge, total and amount still owed
//! - **Insurable amounts**: the portion of a fee covered by registration
//!   cancellation insurance
//!
//! Every amount is rounded to cents with banker's rounding via
//! [`core_kernel::round_money`]. Inputs past [`core_kernel::MAX_FEE_AMOUNT`]
//! are rejected with [`FeeError::Money`] rather than overflowing.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_fees::{DiscountCalculator, TeamFeeCalculator, TeamFeeInput};
//!
//! let discount = DiscountCalculator::calculate(dec!(850), dec!(10), true);
//! let input = TeamFeeInput::new_registration(dec!(250), dec!(600), true, discount, policy, PaymentMethod::CreditCard)?;
//! let fees = TeamFeeCalculator::calculate_team_fees(&input)?;
//! ```

pub mod discount;
pub mod discount_code;
pub mod processing;
pub mod team_fee;
pub mod player_fee;
pub mod insurable;
pub mod error;

pub use discount::DiscountCalculator;
pub use discount_code::{
    normalize_code, DiscountCode, DiscountCodeBook, DiscountCodeUpdate, NewDiscountCode, MAX_CODE_LENGTH,
};
pub use processing::{PaymentMethod, ProcessingFeePolicy, FeeBreakdown};
pub use team_fee::{TeamFeeCalculator, TeamFeeInput};
pub use player_fee::{PlayerFeeCalculator, PlayerFeeInput};
pub use insurable::InsurableAmountCalculator;
pub use error::FeeError;
