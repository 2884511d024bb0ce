//! Drives rounds of a tournament between automated contestants.
//!
//! Each match of a round runs in its own task. A task takes the tournament
//! lock only to read the position and to submit a move; the contestant thinks
//! with the lock released.

use arena_othello::Color;
use arena_player::contestants::Contestant;
use async_std::task;
use derive_more::{Display, Error};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::clock::Clock;
use crate::error::TournamentError;
use crate::matches::{MatchId, MatchResult};
use crate::registry::SharedTournament;

#[derive(Debug, Display, Error)]
pub enum DriverError {
    #[display(fmt = "no contestant named {}", player)]
    MissingContestant { player: String },
    #[display(fmt = "{}", source)]
    Tournament { source: TournamentError },
}

impl From<TournamentError> for DriverError {
    fn from(source: TournamentError) -> Self {
        DriverError::Tournament { source }
    }
}

/// The contestants available to the driver, by name.
#[derive(Default)]
pub struct Roster {
    contestants: HashMap<String, Box<dyn Contestant>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contestant, replacing any with the same name.
    pub fn add(&mut self, contestant: Box<dyn Contestant>) {
        self.contestants
            .insert(contestant.name().to_string(), contestant);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contestants.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.contestants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contestants.is_empty()
    }

    fn take(&mut self, name: &str) -> Result<Box<dyn Contestant>, DriverError> {
        self.contestants
            .remove(name)
            .ok_or_else(|| DriverError::MissingContestant {
                player: name.to_string(),
            })
    }
}

/// What one round produced.
#[derive(Clone, Debug, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub results: Vec<MatchResult>,
    pub bench: Option<String>,
}

/// Pair a new round and play every match in it to the end.
///
/// Every player in the tournament must have a contestant in `roster`.
/// Contestants are lent to their match tasks and returned before this resolves.
#[instrument(skip_all)]
pub async fn play_round<R: Rng + ?Sized>(
    tournament: &SharedTournament,
    roster: &mut Roster,
    clock: Arc<dyn Clock>,
    rng: &mut R,
) -> Result<RoundSummary, DriverError> {
    let (round, pairings, bench) = {
        let mut guard = tournament.lock().await;
        if let Some(missing) = guard.players().iter().find(|p| !roster.contains(&p.name)) {
            return Err(DriverError::MissingContestant {
                player: missing.name.clone(),
            });
        }

        let ids = guard.pair_round(rng, clock.now())?;
        let pairings: Vec<(MatchId, String, String)> = ids
            .into_iter()
            .filter_map(|id| guard.get_match(id))
            .map(|m| {
                (
                    m.id(),
                    m.player(Color::Black).to_string(),
                    m.player(Color::White).to_string(),
                )
            })
            .collect();
        (guard.round(), pairings, guard.bench().map(str::to_string))
    };
    info!(round, matches = pairings.len(), "round started");

    let mut handles = Vec::with_capacity(pairings.len());
    for (id, black_name, white_name) in pairings {
        let black = roster.take(&black_name)?;
        let white = roster.take(&white_name)?;
        handles.push(task::spawn(drive_match(
            tournament.clone(),
            id,
            black,
            white,
            clock.clone(),
        )));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let (black, white, result) = handle.await;
        roster.add(black);
        roster.add(white);
        results.extend(result);
    }

    info!(round, finished = results.len(), "round finished");
    Ok(RoundSummary {
        round,
        results,
        bench,
    })
}

/// Play one match until it ends, returning both contestants and the result.
async fn drive_match(
    tournament: SharedTournament,
    id: MatchId,
    mut black: Box<dyn Contestant>,
    mut white: Box<dyn Contestant>,
    clock: Arc<dyn Clock>,
) -> (Box<dyn Contestant>, Box<dyn Contestant>, Option<MatchResult>) {
    let result = loop {
        let (board, color, player) = {
            let mut guard = tournament.lock().await;
            guard.poll(clock.now());
            match guard.get_match(id) {
                Some(game) if game.is_ongoing() => {
                    let color = game.turn();
                    (game.board(), color, game.player(color).to_string())
                }
                Some(game) => break game.result().cloned(),
                None => break None,
            }
        };

        let contestant = match color {
            Color::Black => &mut black,
            Color::White => &mut white,
        };
        let choice = contestant.choose_move(board, color).await;

        let mut guard = tournament.lock().await;
        let now = clock.now();
        let rejected = match choice {
            Some(location) => match guard.submit_move(&player, location, now) {
                Ok(accepted) => {
                    debug!(%id, %player, %location, forced_pass = accepted.forced_pass, "move played");
                    None
                }
                // The match has already been ended as a forfeit.
                Err(err) if err.is_timeout() => None,
                Err(err) => Some(err.to_string()),
            },
            None => Some("passed with legal moves available".to_string()),
        };

        if let Some(reason) = rejected {
            warn!(%id, %player, %reason, "contestant forfeits");
            if let Err(err) = guard.forfeit(id, color) {
                warn!(%id, error = %err, "could not forfeit match");
            }
        }
    };

    (black, white, result)
}
