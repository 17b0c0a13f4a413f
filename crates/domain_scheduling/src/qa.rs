//! Schedule QA
//!
//! Validates a finished schedule against the teams and fields of a job.
//! Unlike the grid checks in [`crate::conflicts`], which compare start
//! times, QA compares the full time window of each game, so a 60 minute
//! game at 9:00 clashes with one at 9:30.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{FieldId, GameId, TeamId};

use crate::game::{Field, Game, GameKind, Participant, TeamRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QaIssueKind {
    UnknownTeam,
    UnknownField,
    SelfMatch,
    CrossDivision,
    SlotCollision,
    TimeClash,
    BackToBack,
    UnscheduledTeam,
    GameCountOutOfRange,
    RepeatedMatchup,
}

impl QaIssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            QaIssueKind::BackToBack
            | QaIssueKind::GameCountOutOfRange
            | QaIssueKind::RepeatedMatchup => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaIssue {
    pub severity: Severity,
    pub kind: QaIssueKind,
    pub game_ids: Vec<GameId>,
    pub team_id: Option<TeamId>,
    pub message: String,
}

impl QaIssue {
    fn new(kind: QaIssueKind, game_ids: Vec<GameId>, team_id: Option<TeamId>, message: String) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            game_ids,
            team_id,
            message,
        }
    }
}

impl fmt::Display for QaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.severity, self.message)
    }
}

/// Thresholds the QA checks use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    pub min_games_per_team: u32,
    pub max_games_per_team: Option<u32>,
    /// Gaps shorter than this between a team's games are reported
    pub min_rest_minutes: u32,
    /// Pool meetings allowed between the same two teams
    pub max_meetings: u32,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            min_games_per_team: 1,
            max_games_per_team: None,
            min_rest_minutes: 30,
            max_meetings: 1,
        }
    }
}

/// Everything QA needs to see
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaInput {
    pub teams: Vec<TeamRef>,
    pub fields: Vec<Field>,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaReport {
    pub issues: Vec<QaIssue>,
}

impl QaReport {
    /// No issues of any severity
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &QaIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &QaIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn count(&self, kind: QaIssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

pub struct QaValidator {
    config: QaConfig,
}

impl QaValidator {
    pub fn new(config: QaConfig) -> Self {
        Self { config }
    }

    /// Runs every check and collects the issues in check order
    pub fn validate(&self, input: &QaInput) -> QaReport {
        let teams: HashMap<TeamId, &TeamRef> = input.teams.iter().map(|t| (t.id, t)).collect();
        let fields: HashSet<FieldId> = input.fields.iter().map(|f| f.id).collect();

        let mut issues = Vec::new();
        self.check_references(input, &teams, &fields, &mut issues);
        self.check_field_overlaps(&input.games, &mut issues);
        self.check_team_spacing(input, &mut issues);
        self.check_game_counts(input, &mut issues);
        self.check_matchups(&input.games, &mut issues);

        debug!(
            games = input.games.len(),
            issues = issues.len(),
            "schedule QA finished"
        );
        QaReport { issues }
    }

    fn check_references(
        &self,
        input: &QaInput,
        teams: &HashMap<TeamId, &TeamRef>,
        fields: &HashSet<FieldId>,
        issues: &mut Vec<QaIssue>,
    ) {
        for game in &input.games {
            if !fields.contains(&game.field_id) {
                issues.push(QaIssue::new(
                    QaIssueKind::UnknownField,
                    vec![game.id],
                    None,
                    format!("Game {} is on unknown field {}", game.game_number, game.field_id),
                ));
            }

            if game.home == game.away {
                issues.push(QaIssue::new(
                    QaIssueKind::SelfMatch,
                    vec![game.id],
                    game.home.team_id(),
                    format!("Game {} has {} playing itself", game.game_number, game.home),
                ));
            }

            for team_id in game.team_ids() {
                match teams.get(&team_id) {
                    None => issues.push(QaIssue::new(
                        QaIssueKind::UnknownTeam,
                        vec![game.id],
                        Some(team_id),
                        format!("Game {} refers to unknown team {}", game.game_number, team_id),
                    )),
                    Some(team) if team.division_id != game.division_id => issues.push(QaIssue::new(
                        QaIssueKind::CrossDivision,
                        vec![game.id],
                        Some(team_id),
                        format!(
                            "{} is scheduled in game {} outside its division",
                            team.name, game.game_number
                        ),
                    )),
                    Some(_) => {}
                }
            }
        }
    }

    fn check_field_overlaps(&self, games: &[Game], issues: &mut Vec<QaIssue>) {
        for (i, a) in games.iter().enumerate() {
            for b in &games[i + 1..] {
                if a.field_id == b.field_id && a.window().overlaps(&b.window()) {
                    issues.push(QaIssue::new(
                        QaIssueKind::SlotCollision,
                        vec![a.id, b.id],
                        None,
                        format!(
                            "Games {} and {} overlap on field {}",
                            a.game_number, b.game_number, a.field_id
                        ),
                    ));
                }
            }
        }
    }

    fn check_team_spacing(&self, input: &QaInput, issues: &mut Vec<QaIssue>) {
        let min_rest = i64::from(self.config.min_rest_minutes);

        for team in &input.teams {
            let side = Participant::Team(team.id);
            let mut played: Vec<&Game> = input.games.iter().filter(|g| g.involves(&side)).collect();
            played.sort_by_key(|g| g.start);

            for (i, a) in played.iter().enumerate() {
                for b in &played[i + 1..] {
                    match a.window().rest_between(&b.window()) {
                        None => issues.push(QaIssue::new(
                            QaIssueKind::TimeClash,
                            vec![a.id, b.id],
                            Some(team.id),
                            format!(
                                "{} is in overlapping games {} and {}",
                                team.name, a.game_number, b.game_number
                            ),
                        )),
                        Some(rest) if rest < min_rest => issues.push(QaIssue::new(
                            QaIssueKind::BackToBack,
                            vec![a.id, b.id],
                            Some(team.id),
                            format!(
                                "{} has {} minutes between games {} and {}",
                                team.name, rest, a.game_number, b.game_number
                            ),
                        )),
                        Some(_) => {}
                    }
                }
            }
        }
    }

    fn check_game_counts(&self, input: &QaInput, issues: &mut Vec<QaIssue>) {
        for team in &input.teams {
            let side = Participant::Team(team.id);
            let games: Vec<GameId> = input
                .games
                .iter()
                .filter(|g| g.involves(&side))
                .map(|g| g.id)
                .collect();
            let count = games.len() as u32;

            if count == 0 {
                issues.push(QaIssue::new(
                    QaIssueKind::UnscheduledTeam,
                    Vec::new(),
                    Some(team.id),
                    format!("{} has no games", team.name),
                ));
                continue;
            }

            let too_many = self.config.max_games_per_team.is_some_and(|max| count > max);
            if count < self.config.min_games_per_team || too_many {
                issues.push(QaIssue::new(
                    QaIssueKind::GameCountOutOfRange,
                    games,
                    Some(team.id),
                    format!("{} has {} games", team.name, count),
                ));
            }
        }
    }

    fn check_matchups(&self, games: &[Game], issues: &mut Vec<QaIssue>) {
        let mut meetings: BTreeMap<(TeamId, TeamId), Vec<GameId>> = BTreeMap::new();

        for game in games.iter().filter(|g| g.kind == GameKind::Pool) {
            if let (Some(home), Some(away)) = (game.home.team_id(), game.away.team_id()) {
                if home == away {
                    continue;
                }
                let key = if home < away { (home, away) } else { (away, home) };
                meetings.entry(key).or_default().push(game.id);
            }
        }

        for ((a, b), game_ids) in meetings {
            if game_ids.len() as u32 > self.config.max_meetings {
                let message = format!("{} and {} meet {} times in pool play", a, b, game_ids.len());
                issues.push(QaIssue::new(QaIssueKind::RepeatedMatchup, game_ids, Some(a), message));
            }
        }
    }
}

impl Default for QaValidator {
    fn default() -> Self {
        Self::new(QaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use core_kernel::DivisionId;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 7).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn team(name: &str, division_id: DivisionId) -> TeamRef {
        TeamRef {
            id: TeamId::new(),
            name: name.to_string(),
            division_id,
            club_name: None,
        }
    }

    fn game(number: u32, division_id: DivisionId, field: &Field, start: NaiveDateTime, home: &TeamRef, away: &TeamRef) -> Game {
        Game {
            id: GameId::new(),
            game_number: number,
            division_id,
            field_id: field.id,
            start,
            duration_minutes: 60,
            home: Participant::Team(home.id),
            away: Participant::Team(away.id),
            round: 1,
            kind: GameKind::Pool,
        }
    }

    #[test]
    fn test_clean_schedule() {
        let div = DivisionId::new();
        let field = Field::new("Field 1");
        let (a, b) = (team("Hawks", div), team("Owls", div));
        let input = QaInput {
            games: vec![game(1, div, &field, at(8, 0), &a, &b)],
            teams: vec![a, b],
            fields: vec![field],
        };

        let report = QaValidator::default().validate(&input);
        assert!(report.is_clean(), "{:?}", report.issues);
    }

    #[test]
    fn test_overlap_by_window_not_start() {
        let div = DivisionId::new();
        let field = Field::new("Field 1");
        let (a, b, c) = (team("Hawks", div), team("Owls", div), team("Crows", div));
        let input = QaInput {
            games: vec![
                game(1, div, &field, at(9, 0), &a, &b),
                game(2, div, &field, at(9, 30), &a, &c),
            ],
            teams: vec![a, b, c],
            fields: vec![field],
        };

        let report = QaValidator::default().validate(&input);
        assert_eq!(report.count(QaIssueKind::SlotCollision), 1);
        assert_eq!(report.count(QaIssueKind::TimeClash), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn test_short_rest_is_warning() {
        let div = DivisionId::new();
        let field = Field::new("Field 1");
        let (a, b, c) = (team("Hawks", div), team("Owls", div), team("Crows", div));
        let input = QaInput {
            games: vec![
                game(1, div, &field, at(9, 0), &a, &b),
                game(2, div, &field, at(10, 10), &a, &c),
            ],
            teams: vec![a, b, c],
            fields: vec![field],
        };

        let report = QaValidator::default().validate(&input);
        assert_eq!(report.count(QaIssueKind::BackToBack), 1);
        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_unknown_references_and_unscheduled() {
        let div = DivisionId::new();
        let field = Field::new("Field 1");
        let (a, stranger, idle) = (team("Hawks", div), team("Ghosts", div), team("Idle", div));
        let input = QaInput {
            games: vec![game(1, div, &field, at(9, 0), &a, &stranger)],
            teams: vec![a, idle],
            fields: vec![],
        };

        let report = QaValidator::default().validate(&input);
        assert_eq!(report.count(QaIssueKind::UnknownField), 1);
        assert_eq!(report.count(QaIssueKind::UnknownTeam), 1);
        assert_eq!(report.count(QaIssueKind::UnscheduledTeam), 1);
    }

    #[test]
    fn test_cross_division_and_self_match() {
        let (div, other) = (DivisionId::new(), DivisionId::new());
        let field = Field::new("Field 1");
        let (a, b) = (team("Hawks", div), team("Owls", other));
        let input = QaInput {
            games: vec![
                game(1, div, &field, at(9, 0), &a, &b),
                game(2, div, &field, at(11, 0), &a, &a),
            ],
            teams: vec![a, b],
            fields: vec![field],
        };

        let report = QaValidator::default().validate(&input);
        assert_eq!(report.count(QaIssueKind::CrossDivision), 1);
        assert_eq!(report.count(QaIssueKind::SelfMatch), 1);
    }

    #[test]
    fn test_repeated_matchup_and_count() {
        let div = DivisionId::new();
        let field = Field::new("Field 1");
        let (a, b) = (team("Hawks", div), team("Owls", div));
        let input = QaInput {
            games: vec![
                game(1, div, &field, at(8, 0), &a, &b),
                game(2, div, &field, at(10, 0), &b, &a),
                game(3, div, &field, at(12, 0), &a, &b),
            ],
            teams: vec![a, b],
            fields: vec![field],
        };

        let validator = QaValidator::new(QaConfig {
            max_games_per_team: Some(2),
            ..QaConfig::default()
        });
        let report = validator.validate(&input);
        assert_eq!(report.count(QaIssueKind::RepeatedMatchup), 1);
        assert_eq!(report.count(QaIssueKind::GameCountOutOfRange), 2);
        let repeated = report.issues.iter().find(|i| i.kind == QaIssueKind::RepeatedMatchup).unwrap();
        assert_eq!(repeated.game_ids.len(), 3);
    }
}
