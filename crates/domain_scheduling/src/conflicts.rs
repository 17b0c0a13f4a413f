//! Conflict detection over a schedule grid
//!
//! Each check returns the ids of the games to highlight. All three are
//! set-membership scans over rows and cells; an empty grid yields empty sets.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use core_kernel::GameId;

use crate::grid::{GridRow, ScheduleGrid, SideKey};

fn sides_in(row: &GridRow) -> HashSet<SideKey> {
    row.games().flat_map(|g| g.side_keys()).collect()
}

/// Games in which a participant is booked twice at the same start time
pub fn compute_time_clash_game_ids(grid: &ScheduleGrid) -> BTreeSet<GameId> {
    let mut flagged = BTreeSet::new();

    for row in &grid.rows {
        let mut appearances: HashMap<SideKey, u32> = HashMap::new();
        for game in row.games() {
            for side in game.side_keys() {
                *appearances.entry(side).or_default() += 1;
            }
        }

        for (side, _) in appearances.iter().filter(|(_, count)| **count > 1) {
            flagged.extend(row.games().filter(|g| g.has_side(side)).map(|g| g.game_id));
        }
    }

    flagged
}

/// Games in which a participant plays in two adjacent rows of the same day
pub fn compute_back_to_back_game_ids(grid: &ScheduleGrid) -> BTreeSet<GameId> {
    let mut flagged = BTreeSet::new();

    for pair in grid.rows.windows(2) {
        let (earlier, later) = (&pair[0], &pair[1]);
        if earlier.date() != later.date() {
            continue;
        }

        let later_sides = sides_in(later);
        for side in sides_in(earlier).intersection(&later_sides) {
            flagged.extend(earlier.games().filter(|g| g.has_side(side)).map(|g| g.game_id));
            flagged.extend(later.games().filter(|g| g.has_side(side)).map(|g| g.game_id));
        }
    }

    flagged
}

/// Games sharing a field at the same start time
pub fn compute_slot_collision_game_ids(grid: &ScheduleGrid) -> BTreeSet<GameId> {
    grid.rows
        .iter()
        .flat_map(|row| row.cells.iter())
        .filter(|cell| cell.len() > 1)
        .flatten()
        .map(|g| g.game_id)
        .collect()
}

/// All three conflict sets for a grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub time_clashes: BTreeSet<GameId>,
    pub back_to_back: BTreeSet<GameId>,
    pub slot_collisions: BTreeSet<GameId>,
}

impl ConflictSummary {
    pub fn from_grid(grid: &ScheduleGrid) -> Self {
        Self {
            time_clashes: compute_time_clash_game_ids(grid),
            back_to_back: compute_back_to_back_game_ids(grid),
            slot_collisions: compute_slot_collision_game_ids(grid),
        }
    }

    /// True when nothing blocks publishing; back-to-back games are allowed
    pub fn has_blocking_conflicts(&self) -> bool {
        !self.time_clashes.is_empty() || !self.slot_collisions.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.time_clashes.is_empty() && self.back_to_back.is_empty() && self.slot_collisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Participant;
    use crate::grid::GridGame;
    use chrono::{NaiveDate, NaiveDateTime};
    use core_kernel::{DivisionId, TeamId};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn cell(home: Participant, away: Participant) -> GridGame {
        cell_in(DivisionId::new(), home, away)
    }

    fn cell_in(division_id: DivisionId, home: Participant, away: Participant) -> GridGame {
        GridGame {
            game_id: GameId::new(),
            division_id,
            home,
            away,
            duration_minutes: 50,
        }
    }

    fn row(start: NaiveDateTime, cells: Vec<Vec<GridGame>>) -> GridRow {
        GridRow { start, cells }
    }

    #[test]
    fn test_empty_grid() {
        let grid = ScheduleGrid::default();
        assert!(ConflictSummary::from_grid(&grid).is_empty());
    }

    #[test]
    fn test_time_clash_flags_only_involved_games() {
        let (a, b, c, d, e) = (TeamId::new(), TeamId::new(), TeamId::new(), TeamId::new(), TeamId::new());
        let g1 = cell(Participant::Team(a), Participant::Team(b));
        let g2 = cell(Participant::Team(a), Participant::Team(c));
        let g3 = cell(Participant::Team(d), Participant::Team(e));
        let ids = (g1.game_id, g2.game_id, g3.game_id);

        let grid = ScheduleGrid {
            fields: vec![],
            rows: vec![row(at(7, 8), vec![vec![g1], vec![g2], vec![g3]])],
        };

        let clashes = compute_time_clash_game_ids(&grid);
        assert!(clashes.contains(&ids.0) && clashes.contains(&ids.1));
        assert!(!clashes.contains(&ids.2));
    }

    #[test]
    fn test_placeholders_never_clash() {
        let grid = ScheduleGrid {
            fields: vec![],
            rows: vec![row(
                at(7, 8),
                vec![
                    vec![cell(Participant::WinnerOf(1), Participant::Seed(1))],
                    vec![cell(Participant::WinnerOf(1), Participant::Seed(2))],
                ],
            )],
        };
        assert!(compute_time_clash_game_ids(&grid).is_empty());
    }

    #[test]
    fn test_back_to_back_same_day_only() {
        let a = Participant::Team(TeamId::new());
        let g1 = cell(a, Participant::Seed(1));
        let g2 = cell(a, Participant::Seed(2));
        let g3 = cell(a, Participant::Seed(3));
        let ids = (g1.game_id, g2.game_id, g3.game_id);

        let grid = ScheduleGrid {
            fields: vec![],
            rows: vec![
                row(at(7, 17), vec![vec![g1]]),
                row(at(7, 18), vec![vec![g2]]),
                row(at(8, 8), vec![vec![g3]]),
            ],
        };

        let flagged = compute_back_to_back_game_ids(&grid);
        assert_eq!(flagged, BTreeSet::from([ids.0, ids.1]));
        assert!(!flagged.contains(&ids.2));
    }

    #[test]
    fn test_slot_collision() {
        let g1 = cell(Participant::Seed(1), Participant::Seed(2));
        let g2 = cell(Participant::Seed(3), Participant::Seed(4));
        let g3 = cell(Participant::Seed(5), Participant::Seed(6));
        let ids = (g1.game_id, g2.game_id, g3.game_id);

        let grid = ScheduleGrid {
            fields: vec![],
            rows: vec![row(at(7, 8), vec![vec![g1, g2], vec![g3]])],
        };

        let summary = ConflictSummary::from_grid(&grid);
        assert_eq!(summary.slot_collisions, BTreeSet::from([ids.0, ids.1]));
        assert!(summary.has_blocking_conflicts());
    }

    #[test]
    fn test_seeds_are_scoped_to_their_division() {
        let (gold, silver) = (DivisionId::new(), DivisionId::new());
        let g1 = cell_in(gold, Participant::Seed(1), Participant::Seed(2));
        let g2 = cell_in(silver, Participant::Seed(1), Participant::Seed(2));
        let g3 = cell_in(silver, Participant::Seed(1), Participant::Seed(3));
        let g4 = cell_in(gold, Participant::Seed(3), Participant::Seed(4));
        let silver_repeat = BTreeSet::from([g2.game_id, g3.game_id]);

        let grid = ScheduleGrid {
            fields: vec![],
            rows: vec![
                row(at(7, 8), vec![vec![g1], vec![g2]]),
                row(at(7, 9), vec![vec![g3], vec![g4]]),
            ],
        };

        let summary = ConflictSummary::from_grid(&grid);
        assert!(summary.time_clashes.is_empty());
        assert!(!summary.has_blocking_conflicts());
        // silver seed 1 plays both rows; gold seeds do not repeat
        assert_eq!(summary.back_to_back, silver_repeat);
    }

    #[test]
    fn test_same_seed_clashes_within_a_division() {
        let gold = DivisionId::new();
        let g1 = cell_in(gold, Participant::Seed(1), Participant::Seed(2));
        let g2 = cell_in(gold, Participant::Seed(1), Participant::Seed(3));
        let ids = BTreeSet::from([g1.game_id, g2.game_id]);

        let grid = ScheduleGrid {
            fields: vec![],
            rows: vec![row(at(7, 8), vec![vec![g1], vec![g2]])],
        };
        assert_eq!(compute_time_clash_game_ids(&grid), ids);
    }
}
