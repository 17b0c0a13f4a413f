//! Money types with precise decimal arithmetic
//!
//! Registration fees, discounts and processing charges are all decimal
//! amounts. Floating point never touches a fee: every value flows through
//! rust_decimal and is rounded with [`round_money`] before it is stored.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of decimal places every fee amount is rounded to
pub const FEE_DECIMAL_PLACES: u32 = 2;

/// Rounds a fee amount to cents using banker's rounding (half to even)
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(FEE_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Largest amount, in either direction, any fee input may carry
///
/// Far above any real registration fee, and small enough that sums and
/// surcharges of bounded amounts stay inside `Decimal`'s range.
pub const MAX_FEE_AMOUNT: Decimal = dec!(1000000000);

/// Checks that a fee input is within [`MAX_FEE_AMOUNT`]
pub fn ensure_fee_amount(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount.abs() > MAX_FEE_AMOUNT {
        return Err(MoneyError::InvalidAmount(format!(
            "{} exceeds the maximum fee amount of {}",
            amount, MAX_FEE_AMOUNT
        )));
    }
    Ok(amount)
}

/// Currencies a job can bill in (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    CAD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::CAD => "C$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::CAD => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount out of range: {0}")]
    Overflow(String),
}

/// A monetary amount with associated currency
///
/// Amounts are kept at 4 decimal places internally so that intermediate
/// percentage calculations do not lose cents before the final rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Creates a USD amount, the default billing currency
    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, Currency::USD)
    }

    /// Creates Money from an integer amount in minor units (cents)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(minor_units, currency.decimal_places()), currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Rounds to cents with banker's rounding
    pub fn round_to_currency(&self) -> Self {
        Self {
            amount: round_money(self.amount),
            currency: self.currency,
        }
    }

    /// Returns zero when the amount is negative, the amount otherwise
    pub fn clamp_non_negative(&self) -> Self {
        if self.is_negative() {
            Self::zero(self.currency)
        } else {
            *self
        }
    }

    /// Multiplies by a scalar (e.g. a roster size)
    pub fn checked_multiply(&self, factor: Decimal) -> Result<Self, MoneyError> {
        self.amount
            .checked_mul(factor)
            .map(|amount| Self::new(amount, self.currency))
            .ok_or_else(|| MoneyError::Overflow(format!("{} x {}", self, factor)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency.symbol(), self.amount)
    }
}

/// A percentage rate such as a credit-card processing charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a fraction (0.035 for 3.5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a percentage (e.g. 3.5 for 3.5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Applies this rate to an amount and rounds the result to cents
    pub fn apply_decimal(&self, amount: Decimal) -> Result<Decimal, MoneyError> {
        amount
            .checked_mul(self.value)
            .map(round_money)
            .ok_or_else(|| MoneyError::Overflow(format!("{} at {}", amount, self)))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}
