//! Core Kernel - Foundational types shared by every league domain crate
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic and fee rounding
//! - Time windows for games and timeslots, and job timezones
//! - Strongly-typed identifiers for jobs, teams, games and the rest

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{ensure_fee_amount, round_money, Currency, Money, MoneyError, Rate, MAX_FEE_AMOUNT};
pub use temporal::{TimeWindow, Timezone, TemporalError};
pub use identifiers::{
    JobId, AgegroupId, DivisionId, TeamId, ClubId, RegistrationId,
    FieldId, GameId, DiscountCodeId, TimeslotId,
};
pub use error::CoreError;
