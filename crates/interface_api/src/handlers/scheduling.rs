//! Scheduling handlers

use axum::Json;
use tracing::info;
use validator::Validate;

use core_kernel::TeamId;
use domain_scheduling::{
    pairings, AutoBuilder, ConflictSummary, Pairing, QaValidator, ScheduleGrid, TimeslotPlan,
};

use crate::dto::scheduling::*;
use crate::error::ApiError;

fn seeded(mut block: Vec<Pairing>, team_count: u32, team_ids: Option<&[TeamId]>) -> Result<PairingsResponse, ApiError> {
    if let Some(ids) = team_ids {
        if ids.len() != team_count as usize {
            return Err(ApiError::validation(format!(
                "{} team ids given for {} teams",
                ids.len(),
                team_count
            )));
        }
        pairings::assign_seeds(&mut block, ids)?;
    }
    Ok(PairingsResponse {
        game_count: block.len(),
        pairings: block,
    })
}

/// Round-robin block for a pool
pub async fn round_robin(
    Json(request): Json<RoundRobinRequest>,
) -> Result<Json<PairingsResponse>, ApiError> {
    request.validate()?;

    let block = if request.double {
        pairings::double_round_robin(request.team_count)
    } else {
        pairings::round_robin(request.team_count)
    };

    seeded(block, request.team_count, request.team_ids.as_deref()).map(Json)
}

/// Single-elimination bracket, optionally with a consolation game
pub async fn bracket(
    Json(request): Json<BracketRequest>,
) -> Result<Json<PairingsResponse>, ApiError> {
    request.validate()?;

    let block = if request.consolation {
        pairings::single_elimination_with_consolation(request.team_count)
    } else {
        pairings::single_elimination(request.team_count)
    };

    seeded(block, request.team_count, request.team_ids.as_deref()).map(Json)
}

/// Places a division's pairings into the job's timeslots
pub async fn auto_build(
    Json(request): Json<AutoBuildRequest>,
) -> Result<Json<AutoBuildResponse>, ApiError> {
    request.validate()?;

    let plan = TimeslotPlan::from_templates(&request.timeslots)?;
    let builder = AutoBuilder::new(request.config)?;
    let result = builder.build(
        request.division_id,
        &request.pairings,
        &plan,
        &request.existing_games,
    );

    info!(
        division_id = %request.division_id,
        placed = result.games.len(),
        unplaced = result.unplaced.len(),
        "auto-build request served"
    );

    Ok(Json(AutoBuildResponse {
        complete: result.is_complete(),
        games: result.games,
        unplaced: result.unplaced,
    }))
}

/// Lays games out on the field/time grid and flags conflicts
pub async fn conflicts(
    Json(request): Json<ConflictsRequest>,
) -> Result<Json<ConflictsResponse>, ApiError> {
    request.validate()?;

    let grid = ScheduleGrid::from_games(&request.fields, &request.games);
    let conflicts = ConflictSummary::from_grid(&grid);

    Ok(Json(ConflictsResponse {
        has_blocking_conflicts: conflicts.has_blocking_conflicts(),
        conflicts,
        grid,
    }))
}

/// Full QA report over a schedule
pub async fn qa(Json(request): Json<QaRequest>) -> Json<QaResponse> {
    let report = QaValidator::new(request.config).validate(&request.input);

    Json(QaResponse {
        clean: report.is_clean(),
        has_errors: report.has_errors(),
        error_count: report.errors().count(),
        warning_count: report.warnings().count(),
        issues: report.issues,
    })
}
