//! Player records and the standings table.

use arena_othello::Color;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::matches::{MatchResult, Outcome};

const POINTS_PER_WIN: u32 = 3;
const POINTS_PER_DRAW: u32 = 1;

/// Cumulative results for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub piece_differential: i32,
}

impl Record {
    pub fn points(&self) -> u32 {
        POINTS_PER_WIN * self.wins + POINTS_PER_DRAW * self.draws
    }

    pub fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn add(&mut self, outcome: Outcome, differential: i32) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.piece_differential += differential;
    }
}

/// A tournament participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub record: Record,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record: Record::default(),
        }
    }
}

/// Fold one match result into the records of both its players.
pub fn fold_result(players: &mut [Player], result: &MatchResult) {
    for &color in Color::BOTH.iter() {
        let name = result.player(color);
        match players.iter_mut().find(|player| player.name == name) {
            Some(player) => player
                .record
                .add(result.outcome_for(color), result.differential_for(color)),
            None => warn!(player = name, "result for a player who has left"),
        }
    }
}

/// One row of the standings table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-indexed position.
    pub rank: usize,
    pub name: String,
    pub points: u32,
    #[serde(flatten)]
    pub record: Record,
}

/// Rank players by points, then piece differential, both descending.
/// Remaining ties are listed by name.
pub fn standings(players: &[Player]) -> Vec<Standing> {
    players
        .iter()
        .sorted_by(|a, b| {
            b.record
                .points()
                .cmp(&a.record.points())
                .then(b.record.piece_differential.cmp(&a.record.piece_differential))
                .then(a.name.cmp(&b.name))
        })
        .enumerate()
        .map(|(index, player)| Standing {
            rank: index + 1,
            name: player.name.clone(),
            points: player.record.points(),
            record: player.record,
        })
        .collect()
}
