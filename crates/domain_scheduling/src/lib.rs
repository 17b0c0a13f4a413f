//! Scheduling Domain
//!
//! This crate turns divisions of teams into a playable schedule and checks
//! the result:
//!
//! - **Pairings**: who plays whom, before any field or time is chosen
//!   (round-robin blocks, single-elimination brackets, one-off games)
//! - **Timeslots**: the field/time grid a job has available
//! - **Auto-build**: places pairings into timeslots without clashes
//! - **Grid and conflicts**: the materialized schedule grid and the
//!   time-clash, back-to-back and slot-collision checks run over it
//! - **QA**: a full validation report over a finished schedule
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_scheduling::{pairings, AutoBuilder, AutoBuildConfig, TimeslotPlan};
//!
//! let mut block = pairings::round_robin(6);
//! pairings::assign_seeds(&mut block, &team_ids)?;
//! let plan = TimeslotPlan::from_templates(&templates)?;
//! let result = AutoBuilder::new(AutoBuildConfig::default())?.build(division_id, &block, &plan, &[]);
//! ```

pub mod game;
pub mod pairings;
pub mod timeslots;
pub mod auto_build;
pub mod grid;
pub mod conflicts;
pub mod qa;
pub mod error;

pub use game::{Field, Game, GameKind, Participant, TeamRef};
pub use pairings::Pairing;
pub use timeslots::{Timeslot, TimeslotPlan, TimeslotTemplate};
pub use auto_build::{AutoBuildConfig, AutoBuildResult, AutoBuilder};
pub use grid::{GridGame, GridRow, ScheduleGrid, SideKey};
pub use conflicts::{
    compute_back_to_back_game_ids, compute_slot_collision_game_ids, compute_time_clash_game_ids,
    ConflictSummary,
};
pub use qa::{QaConfig, QaInput, QaIssue, QaIssueKind, QaReport, QaValidator, Severity};
pub use error::SchedulingError;
