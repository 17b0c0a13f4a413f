//! Games and the things they refer to

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{DivisionId, FieldId, GameId, TeamId, TimeWindow};

/// One side of a game
///
/// Pool games name teams (or seeds before teams are drawn); bracket games
/// in later rounds name the game whose winner or loser advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Participant {
    Team(TeamId),
    Seed(u32),
    WinnerOf(u32),
    LoserOf(u32),
}

impl Participant {
    /// True when this side is a concrete entrant that occupies a time
    ///
    /// `WinnerOf`/`LoserOf` are placeholders; they cannot clash until the
    /// earlier game is decided.
    pub fn occupies_time(&self) -> bool {
        matches!(self, Participant::Team(_) | Participant::Seed(_))
    }

    /// Game number this side waits on, if any
    pub fn depends_on(&self) -> Option<u32> {
        match self {
            Participant::WinnerOf(g) | Participant::LoserOf(g) => Some(*g),
            _ => None,
        }
    }

    pub fn team_id(&self) -> Option<TeamId> {
        match self {
            Participant::Team(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Team(id) => write!(f, "{}", id),
            Participant::Seed(s) => write!(f, "Seed {}", s),
            Participant::WinnerOf(g) => write!(f, "Winner of game {}", g),
            Participant::LoserOf(g) => write!(f, "Loser of game {}", g),
        }
    }
}

/// What kind of pairing produced a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Pool,
    Bracket,
    Single,
}

/// A playing field at a venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FieldId::new(),
            name: name.into(),
        }
    }
}

/// A registered team as the scheduler sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
    pub division_id: DivisionId,
    pub club_name: Option<String>,
}

/// A game placed on a field at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// Number of the pairing this game was built from, unique per division
    pub game_number: u32,
    pub division_id: DivisionId,
    pub field_id: FieldId,
    pub start: NaiveDateTime,
    pub duration_minutes: u32,
    pub home: Participant,
    pub away: Participant,
    pub round: u32,
    pub kind: GameKind,
}

impl Game {
    /// Time the game occupies its field; zero-length games count as one minute
    pub fn window(&self) -> TimeWindow {
        let minutes = i64::from(self.duration_minutes.max(1));
        TimeWindow {
            start: self.start,
            end: self.start + Duration::minutes(minutes),
        }
    }

    pub fn end(&self) -> NaiveDateTime {
        self.window().end
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

    pub fn involves(&self, participant: &Participant) -> bool {
        self.home == *participant || self.away == *participant
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        [self.home, self.away]
            .iter()
            .filter_map(Participant::team_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn game(home: Participant, away: Participant) -> Game {
        Game {
            id: GameId::new(),
            game_number: 1,
            division_id: DivisionId::new(),
            field_id: FieldId::new(),
            start: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap().and_hms_opt(8, 0, 0).unwrap(),
            duration_minutes: 50,
            home,
            away,
            round: 1,
            kind: GameKind::Pool,
        }
    }

    #[test]
    fn test_placeholders_do_not_occupy_time() {
        let g = game(Participant::WinnerOf(1), Participant::Seed(3));
        assert_eq!(g.participants(), vec![Participant::Seed(3)]);
        assert!(g.team_ids().is_empty());
    }

    #[test]
    fn test_window_end() {
        let g = game(Participant::Seed(1), Participant::Seed(2));
        assert_eq!(g.end(), g.start + Duration::minutes(50));
    }

    #[test]
    fn test_participant_serializes_tagged() {
        let json = serde_json::to_value(Participant::WinnerOf(4)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "winner_of", "value": 4}));
    }
}
