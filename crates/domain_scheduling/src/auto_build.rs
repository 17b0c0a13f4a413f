//! Auto-build: places a division's pairings into open timeslots
//!
//! The builder is greedy and deterministic. Pairings are taken in
//! `(round, game_number)` order and each goes into the earliest slot where
//! it fits; a pairing that fits nowhere is reported back rather than
//! forced in.

use std::collections::HashMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use core_kernel::{DivisionId, GameId, TimeWindow};

use crate::error::SchedulingError;
use crate::game::{Game, Participant};
use crate::pairings::Pairing;
use crate::timeslots::{Timeslot, TimeslotPlan};

/// Rules the builder places games under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBuildConfig {
    pub game_duration_minutes: u32,
    /// Minimum minutes between a team's games; 0 allows back-to-back
    pub min_rest_minutes: u32,
    pub max_games_per_team_per_day: Option<u32>,
}

impl Default for AutoBuildConfig {
    fn default() -> Self {
        Self {
            game_duration_minutes: 50,
            min_rest_minutes: 0,
            max_games_per_team_per_day: None,
        }
    }
}

impl AutoBuildConfig {
    pub fn validate(&self) -> Result<(), SchedulingError> {
        if self.game_duration_minutes == 0 {
            return Err(SchedulingError::InvalidConfig(
                "game duration must be at least one minute".to_string(),
            ));
        }
        if self.max_games_per_team_per_day == Some(0) {
            return Err(SchedulingError::InvalidConfig(
                "a daily game cap of zero leaves nothing to schedule".to_string(),
            ));
        }
        Ok(())
    }
}

/// Games the builder placed and pairings it could not
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBuildResult {
    pub games: Vec<Game>,
    pub unplaced: Vec<Pairing>,
}

impl AutoBuildResult {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

pub struct AutoBuilder {
    config: AutoBuildConfig,
}

impl AutoBuilder {
    pub fn new(config: AutoBuildConfig) -> Result<Self, SchedulingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AutoBuildConfig {
        &self.config
    }

    /// Builds games for one division
    ///
    /// # Arguments
    ///
    /// * `division_id` - Division the pairings belong to
    /// * `pairings` - Matchups to place; seeds are treated as teams local to the division
    /// * `plan` - Available slots in placement order
    /// * `existing` - Games already on the schedule, from any division
    pub fn build(
        &self,
        division_id: DivisionId,
        pairings: &[Pairing],
        plan: &TimeslotPlan,
        existing: &[Game],
    ) -> AutoBuildResult {
        let mut ordered = pairings.to_vec();
        ordered.sort_by_key(|p| (p.round, p.game_number));

        let mut finished: HashMap<u32, TimeWindow> = existing
            .iter()
            .filter(|g| g.division_id == division_id)
            .map(|g| (g.game_number, g.window()))
            .collect();

        let mut result = AutoBuildResult::default();

        for pairing in ordered {
            let slot = plan
                .slots()
                .iter()
                .find(|slot| self.fits(division_id, &pairing, slot, existing, &result.games, &finished));

            match slot {
                Some(slot) => {
                    let game = Game {
                        id: GameId::new_v7(),
                        game_number: pairing.game_number,
                        division_id,
                        field_id: slot.field_id,
                        start: slot.start,
                        duration_minutes: self.config.game_duration_minutes,
                        home: pairing.home,
                        away: pairing.away,
                        round: pairing.round,
                        kind: pairing.kind,
                    };
                    debug!(game_number = pairing.game_number, start = %slot.start, "pairing placed");
                    finished.insert(game.game_number, game.window());
                    result.games.push(game);
                }
                None => {
                    warn!(
                        division_id = %division_id,
                        game_number = pairing.game_number,
                        round = pairing.round,
                        "no timeslot fits pairing"
                    );
                    result.unplaced.push(pairing);
                }
            }
        }

        info!(
            division_id = %division_id,
            placed = result.games.len(),
            unplaced = result.unplaced.len(),
            "auto-build finished"
        );
        result
    }

    fn fits(
        &self,
        division_id: DivisionId,
        pairing: &Pairing,
        slot: &Timeslot,
        existing: &[Game],
        placed: &[Game],
        finished: &HashMap<u32, TimeWindow>,
    ) -> bool {
        let window = TimeWindow {
            start: slot.start,
            end: slot.start + Duration::minutes(i64::from(self.config.game_duration_minutes)),
        };
        let scheduled = || existing.iter().chain(placed.iter());
        let min_rest = i64::from(self.config.min_rest_minutes);

        let field_taken = scheduled()
            .any(|g| g.field_id == slot.field_id && g.window().overlaps(&window));
        if field_taken {
            return false;
        }

        for dependency in pairing.dependencies() {
            match finished.get(&dependency) {
                Some(earlier) if earlier.gap_minutes_to(&window) >= min_rest => {}
                _ => return false,
            }
        }

        let mut sides = vec![pairing.home];
        if pairing.away != pairing.home {
            sides.push(pairing.away);
        }

        for side in sides.into_iter().filter(Participant::occupies_time) {
            // seeds only identify a team within their own division
            let plays = |g: &&Game| {
                g.involves(&side) && (side.team_id().is_some() || g.division_id == division_id)
            };

            let rested = scheduled()
                .filter(plays)
                .all(|g| matches!(g.window().rest_between(&window), Some(rest) if rest >= min_rest));
            if !rested {
                return false;
            }

            if let Some(cap) = self.config.max_games_per_team_per_day {
                let that_day = scheduled()
                    .filter(plays)
                    .filter(|g| g.start.date() == window.date())
                    .count();
                if that_day >= cap as usize {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflicts::ConflictSummary;
    use crate::grid::ScheduleGrid;
    use crate::pairings::{round_robin, single_elimination};
    use crate::timeslots::TimeslotTemplate;
    use chrono::{NaiveDate, NaiveTime};
    use core_kernel::FieldId;

    fn plan(fields: &[FieldId], first_hour: u32, games_per_field: u32) -> TimeslotPlan {
        let templates: Vec<_> = fields
            .iter()
            .map(|f| TimeslotTemplate {
                field_id: *f,
                date: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
                first_game: NaiveTime::from_hms_opt(first_hour, 0, 0).unwrap(),
                game_interval_minutes: 60,
                max_games: games_per_field,
            })
            .collect();
        TimeslotPlan::from_templates(&templates).unwrap()
    }

    #[test]
    fn test_round_robin_places_without_conflicts() {
        let fields = [FieldId::new(), FieldId::new()];
        let builder = AutoBuilder::new(AutoBuildConfig::default()).unwrap();
        let result = builder.build(DivisionId::new(), &round_robin(4), &plan(&fields, 8, 3), &[]);

        assert!(result.is_complete());
        assert_eq!(result.games.len(), 6);

        let grid = ScheduleGrid::from_games(&fields, &result.games);
        let summary = ConflictSummary::from_grid(&grid);
        assert!(summary.time_clashes.is_empty());
        assert!(summary.slot_collisions.is_empty());
    }

    #[test]
    fn test_bracket_waits_for_feeder_games() {
        let fields = [FieldId::new(), FieldId::new()];
        let builder = AutoBuilder::new(AutoBuildConfig {
            min_rest_minutes: 30,
            ..AutoBuildConfig::default()
        })
        .unwrap();
        let result = builder.build(DivisionId::new(), &single_elimination(4), &plan(&fields, 8, 4), &[]);

        assert!(result.is_complete());
        let final_game = result.games.iter().find(|g| g.game_number == 3).unwrap();
        let semis: Vec<_> = result.games.iter().filter(|g| g.round == 1).collect();
        assert!(semis.iter().all(|s| s.end() + Duration::minutes(30) <= final_game.start));
    }

    #[test]
    fn test_not_enough_slots_reports_unplaced() {
        let fields = [FieldId::new()];
        let builder = AutoBuilder::new(AutoBuildConfig::default()).unwrap();
        let result = builder.build(DivisionId::new(), &round_robin(4), &plan(&fields, 8, 4), &[]);

        assert_eq!(result.games.len(), 4);
        assert_eq!(result.unplaced.len(), 2);
    }

    #[test]
    fn test_daily_cap() {
        let fields = [FieldId::new(), FieldId::new()];
        let builder = AutoBuilder::new(AutoBuildConfig {
            max_games_per_team_per_day: Some(2),
            ..AutoBuildConfig::default()
        })
        .unwrap();
        let result = builder.build(DivisionId::new(), &round_robin(4), &plan(&fields, 8, 6), &[]);

        assert_eq!(result.games.len(), 4);
        assert_eq!(result.unplaced.len(), 2);
    }

    #[test]
    fn test_existing_games_block_field() {
        let fields = [FieldId::new()];
        let slots = plan(&fields, 8, 2);
        let builder = AutoBuilder::new(AutoBuildConfig::default()).unwrap();

        let other_division = builder.build(DivisionId::new(), &round_robin(2), &slots, &[]);
        let result = builder.build(DivisionId::new(), &round_robin(2), &slots, &other_division.games);

        assert_eq!(result.games.len(), 1);
        assert_ne!(result.games[0].start, other_division.games[0].start);
    }

    #[test]
    fn test_invalid_config() {
        assert!(AutoBuilder::new(AutoBuildConfig {
            game_duration_minutes: 0,
            ..AutoBuildConfig::default()
        })
        .is_err());
    }
}
