//! Scheduling domain errors

use thiserror::Error;

use core_kernel::TemporalError;

/// Errors that can occur in the scheduling domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulingError {
    /// Timeslot template cannot produce slots
    #[error("Invalid timeslot template: {0}")]
    InvalidTimeslot(String),

    /// A pairing refers to a seed with no team assigned
    #[error("Seed {seed} is out of range for {team_count} teams")]
    SeedOutOfRange {
        seed: u32,
        team_count: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),
}
