//! The schedule grid: one row per start time, one column per field
//!
//! This is the shape schedulers edit and review. A cell normally holds at
//! most one game; more than one is a slot collision.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{DivisionId, FieldId, GameId};

use crate::game::{Game, Participant};

/// The slice of a game the grid shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGame {
    pub game_id: GameId,
    pub division_id: DivisionId,
    pub home: Participant,
    pub away: Participant,
    pub duration_minutes: u32,
}

impl GridGame {
    pub fn involves(&self, participant: &Participant) -> bool {
        self.home == *participant || self.away == *participant
    }

    /// Sides that occupy a time, deduplicated
    pub fn participants(&self) -> Vec<Participant> {
        let mut sides = Vec::with_capacity(2);
        for side in [self.home, self.away] {
            if side.occupies_time() && !sides.contains(&side) {
                sides.push(side);
            }
        }
        sides
    }

    /// Sides that occupy a time, keyed so that seeds only meet seeds of
    /// the same division
    pub fn side_keys(&self) -> Vec<SideKey> {
        self.participants()
            .into_iter()
            .map(|side| SideKey {
                division_id: side.team_id().is_none().then_some(self.division_id),
                side,
            })
            .collect()
    }

    pub fn has_side(&self, key: &SideKey) -> bool {
        self.side_keys().contains(key)
    }
}

/// A participant as the conflict checks compare it
///
/// Teams are global. `Seed(n)` means a different team in every division,
/// so seeds carry their division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideKey {
    pub division_id: Option<DivisionId>,
    pub side: Participant,
}

impl From<&Game> for GridGame {
    fn from(game: &Game) -> Self {
        Self {
            game_id: game.id,
            division_id: game.division_id,
            home: game.home,
            away: game.away,
            duration_minutes: game.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub start: NaiveDateTime,
    /// One entry per grid field, in grid field order
    pub cells: Vec<Vec<GridGame>>,
}

impl GridRow {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn games(&self) -> impl Iterator<Item = &GridGame> {
        self.cells.iter().flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGrid {
    pub fields: Vec<FieldId>,
    pub rows: Vec<GridRow>,
}

impl ScheduleGrid {
    /// Lays games out by start time and field
    ///
    /// Games on fields not listed in `fields` are left off the grid.
    pub fn from_games(fields: &[FieldId], games: &[Game]) -> Self {
        let starts: BTreeSet<NaiveDateTime> = games.iter().map(|g| g.start).collect();

        let mut rows: Vec<GridRow> = starts
            .into_iter()
            .map(|start| GridRow {
                start,
                cells: vec![Vec::new(); fields.len()],
            })
            .collect();

        for game in games {
            let Some(column) = fields.iter().position(|f| *f == game.field_id) else {
                debug!(game_id = %game.id, field_id = %game.field_id, "game on unknown field left off grid");
                continue;
            };
            if let Ok(row) = rows.binary_search_by(|r| r.start.cmp(&game.start)) {
                rows[row].cells[column].push(GridGame::from(game));
            }
        }

        Self {
            fields: fields.to_vec(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.games().next().is_none())
    }

    pub fn game_count(&self) -> usize {
        self.rows.iter().map(|r| r.games().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameKind;
    use chrono::NaiveDate;

    fn game(field_id: FieldId, hour: u32) -> Game {
        Game {
            id: GameId::new(),
            game_number: 1,
            division_id: DivisionId::new(),
            field_id,
            start: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap().and_hms_opt(hour, 0, 0).unwrap(),
            duration_minutes: 50,
            home: Participant::Seed(1),
            away: Participant::Seed(2),
            round: 1,
            kind: GameKind::Pool,
        }
    }

    #[test]
    fn test_rows_sorted_and_cells_by_field() {
        let f1 = FieldId::new();
        let f2 = FieldId::new();
        let games = vec![game(f2, 10), game(f1, 8), game(f1, 10)];

        let grid = ScheduleGrid::from_games(&[f1, f2], &games);
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[0].cells[0].len(), 1);
        assert!(grid.rows[0].cells[1].is_empty());
        assert_eq!(grid.rows[1].cells[1][0].game_id, games[0].id);
        assert_eq!(grid.game_count(), 3);
    }

    #[test]
    fn test_unknown_field_is_skipped() {
        let grid = ScheduleGrid::from_games(&[FieldId::new()], &[game(FieldId::new(), 9)]);
        assert_eq!(grid.game_count(), 0);
        assert!(grid.is_empty());
    }
}
