//! Scheduling DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{DivisionId, FieldId, TeamId};
use domain_scheduling::{
    AutoBuildConfig, ConflictSummary, Game, Pairing, QaConfig, QaInput, QaIssue, ScheduleGrid,
    TimeslotTemplate,
};

#[derive(Debug, Deserialize, Validate)]
pub struct RoundRobinRequest {
    #[validate(range(min = 2, max = 64))]
    pub team_count: u32,
    /// Every pair meets twice, home and away swapped
    #[serde(default)]
    pub double: bool,
    /// Teams in seed order; when given, seeds are replaced by teams
    pub team_ids: Option<Vec<TeamId>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BracketRequest {
    #[validate(range(min = 2, max = 128))]
    pub team_count: u32,
    /// Adds a third-place game between the semifinal losers
    #[serde(default)]
    pub consolation: bool,
    pub team_ids: Option<Vec<TeamId>>,
}

#[derive(Debug, Serialize)]
pub struct PairingsResponse {
    pub game_count: usize,
    pub pairings: Vec<Pairing>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AutoBuildRequest {
    pub division_id: DivisionId,
    #[validate(length(min = 1))]
    pub pairings: Vec<Pairing>,
    #[validate(length(min = 1))]
    pub timeslots: Vec<TimeslotTemplate>,
    #[serde(default)]
    pub config: AutoBuildConfig,
    /// Games already on the schedule, from this or other divisions
    #[serde(default)]
    pub existing_games: Vec<Game>,
}

#[derive(Debug, Serialize)]
pub struct AutoBuildResponse {
    pub complete: bool,
    pub games: Vec<Game>,
    pub unplaced: Vec<Pairing>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ConflictsRequest {
    /// Grid columns, left to right
    #[validate(length(min = 1))]
    pub fields: Vec<FieldId>,
    pub games: Vec<Game>,
}

#[derive(Debug, Serialize)]
pub struct ConflictsResponse {
    pub has_blocking_conflicts: bool,
    pub conflicts: ConflictSummary,
    pub grid: ScheduleGrid,
}

#[derive(Debug, Deserialize)]
pub struct QaRequest {
    #[serde(flatten)]
    pub input: QaInput,
    #[serde(default)]
    pub config: QaConfig,
}

#[derive(Debug, Serialize)]
pub struct QaResponse {
    pub clean: bool,
    pub has_errors: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: Vec<QaIssue>,
}
