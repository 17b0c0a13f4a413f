//! Request handlers, one module per area

pub mod health;
pub mod fees;
pub mod discount_codes;
pub mod scheduling;
pub mod clubs;
pub mod membership;
