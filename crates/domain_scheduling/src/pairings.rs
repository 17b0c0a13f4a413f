//! Pairings: matchups before field and time assignment
//!
//! Generators work on seeds (`Seed(1)..=Seed(n)`) so a block can be built
//! before teams are drawn; [`assign_seeds`] swaps the seeds for teams.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use core_kernel::TeamId;

use crate::error::SchedulingError;
use crate::game::{GameKind, Participant};

/// A scheduled matchup template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub game_number: u32,
    pub round: u32,
    pub home: Participant,
    pub away: Participant,
    pub kind: GameKind,
}

impl Pairing {
    /// Game numbers this pairing must wait for
    pub fn dependencies(&self) -> impl Iterator<Item = u32> + '_ {
        [self.home, self.away].into_iter().filter_map(|p| p.depends_on())
    }
}

/// Round-robin block where every seed meets every other seed once
///
/// Uses the circle method: seed 1 stays put while the others rotate. An
/// odd field gets a bye seat and games against the bye are dropped, so
/// `n` teams play over `n - 1` rounds (even) or `n` rounds (odd).
pub fn round_robin(team_count: u32) -> Vec<Pairing> {
    if team_count < 2 {
        return Vec::new();
    }

    let mut seats: Vec<Option<u32>> = (1..=team_count).map(Some).collect();
    if team_count % 2 == 1 {
        seats.push(None);
    }
    let seat_count = seats.len();
    let rounds = seat_count - 1;

    let mut pairings = Vec::with_capacity((team_count * (team_count - 1) / 2) as usize);
    let mut game_number = 1;

    for round in 0..rounds {
        for i in 0..seat_count / 2 {
            let (Some(a), Some(b)) = (seats[i], seats[seat_count - 1 - i]) else {
                continue;
            };
            // the fixed seat would otherwise always be home
            let (home, away) = if i == 0 && round % 2 == 1 { (b, a) } else { (a, b) };
            pairings.push(Pairing {
                game_number,
                round: round as u32 + 1,
                home: Participant::Seed(home),
                away: Participant::Seed(away),
                kind: GameKind::Pool,
            });
            game_number += 1;
        }
        seats[1..].rotate_right(1);
    }

    pairings
}

/// Two round-robin blocks, the second with home and away swapped
pub fn double_round_robin(team_count: u32) -> Vec<Pairing> {
    let first = round_robin(team_count);
    let rounds = first.iter().map(|p| p.round).max().unwrap_or(0);
    let games = first.len() as u32;

    let second: Vec<Pairing> = first
        .iter()
        .map(|p| Pairing {
            game_number: p.game_number + games,
            round: p.round + rounds,
            home: p.away,
            away: p.home,
            kind: p.kind,
        })
        .collect();

    first.into_iter().chain(second).collect()
}

/// Standard bracket order for a power-of-two field: 1, N, N/2, N/2+1, ...
fn bracket_seed_order(size: u32) -> Vec<u32> {
    let mut order = vec![1];
    while (order.len() as u32) < size {
        let next_len = order.len() as u32 * 2;
        order = order
            .iter()
            .flat_map(|&s| [s, next_len + 1 - s])
            .collect();
    }
    order
}

/// Single-elimination bracket
///
/// The field is padded to the next power of two; the top seeds receive
/// byes and enter round 2 directly. `n` teams produce `n - 1` games.
pub fn single_elimination(team_count: u32) -> Vec<Pairing> {
    if team_count < 2 {
        return Vec::new();
    }

    let order = bracket_seed_order(team_count.next_power_of_two());
    let mut pairings = Vec::with_capacity(team_count as usize - 1);
    let mut game_number = 1;

    let mut slots: Vec<Participant> = order
        .chunks(2)
        .map(|pair| {
            let (top, bottom) = (pair[0], pair[1]);
            if bottom > team_count {
                Participant::Seed(top)
            } else {
                pairings.push(Pairing {
                    game_number,
                    round: 1,
                    home: Participant::Seed(top),
                    away: Participant::Seed(bottom),
                    kind: GameKind::Bracket,
                });
                game_number += 1;
                Participant::WinnerOf(game_number - 1)
            }
        })
        .collect();

    let mut round = 2;
    while slots.len() > 1 {
        slots = slots
            .chunks(2)
            .map(|pair| {
                pairings.push(Pairing {
                    game_number,
                    round,
                    home: pair[0],
                    away: pair[1],
                    kind: GameKind::Bracket,
                });
                game_number += 1;
                Participant::WinnerOf(game_number - 1)
            })
            .collect();
        round += 1;
    }

    pairings
}

/// Single-elimination bracket plus a third-place game between the losing
/// semifinalists, played in the final's round
pub fn single_elimination_with_consolation(team_count: u32) -> Vec<Pairing> {
    let mut pairings = single_elimination(team_count);
    if team_count < 4 {
        return pairings;
    }

    let Some(final_game) = pairings.last().copied() else {
        return pairings;
    };
    if let (Some(a), Some(b)) = (final_game.home.depends_on(), final_game.away.depends_on()) {
        pairings.push(Pairing {
            game_number: final_game.game_number + 1,
            round: final_game.round,
            home: Participant::LoserOf(a),
            away: Participant::LoserOf(b),
            kind: GameKind::Bracket,
        });
    }
    pairings
}

/// A one-off game
pub fn single_game(home: Participant, away: Participant, round: u32) -> Pairing {
    Pairing {
        game_number: 1,
        round,
        home,
        away,
        kind: GameKind::Single,
    }
}

/// Replaces `Seed(i)` with the `i`-th team (1-based)
///
/// Leaves `pairings` untouched when any seed has no team.
pub fn assign_seeds(pairings: &mut [Pairing], teams: &[TeamId]) -> Result<(), SchedulingError> {
    let resolve = |side: Participant| -> Result<Participant, SchedulingError> {
        match side {
            Participant::Seed(seed) => {
                let index = (seed as usize).checked_sub(1);
                index
                    .and_then(|i| teams.get(i))
                    .map(|id| Participant::Team(*id))
                    .ok_or(SchedulingError::SeedOutOfRange {
                        seed,
                        team_count: teams.len(),
                    })
            }
            other => Ok(other),
        }
    };

    let resolved = pairings
        .iter()
        .map(|p| Ok((resolve(p.home)?, resolve(p.away)?)))
        .collect::<Result<Vec<_>, SchedulingError>>()?;

    for (pairing, (home, away)) in pairings.iter_mut().zip(resolved) {
        pairing.home = home;
        pairing.away = away;
    }
    Ok(())
}

/// Renumbers a block so its first game is `first`, keeping
/// winner/loser references pointing at the same games
///
/// Numbers follow slice order. When old numbers repeat, references
/// resolve to the first pairing that carried the number.
pub fn renumber(pairings: &mut [Pairing], first: u32) {
    let mut mapping: HashMap<u32, u32> = HashMap::with_capacity(pairings.len());
    for (i, p) in pairings.iter().enumerate() {
        mapping.entry(p.game_number).or_insert(first + i as u32);
    }

    let remap = |side: Participant| match side {
        Participant::WinnerOf(g) => Participant::WinnerOf(*mapping.get(&g).unwrap_or(&g)),
        Participant::LoserOf(g) => Participant::LoserOf(*mapping.get(&g).unwrap_or(&g)),
        other => other,
    };

    for (i, pairing) in pairings.iter_mut().enumerate() {
        pairing.game_number = first + i as u32;
        pairing.home = remap(pairing.home);
        pairing.away = remap(pairing.away);
    }
}
