//! A tournament: its players, bench and matches, changed only through
//! the transition methods on [`Tournament`].
//!
//! Each successful transition bumps [`Tournament::version`], so callers can
//! tell whether anything changed between two reads.

use arena_othello::{Color, Location, LocationList};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::{MatchError, PairingBlock, TournamentError};
use crate::matches::{Match, MatchId, MatchResult, MoveAccepted};
use crate::pairing::pair_players;
use crate::standings::{self, Player, Record, Standing};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    /// Accepting new players.
    Available,
    Closed,
}

#[derive(Clone, Debug, Serialize)]
pub struct Tournament {
    name: String,
    status: TournamentStatus,
    players: Vec<Player>,
    bench: Option<String>,
    matches: Vec<Match>,
    round: u32,
    version: u64,
    move_deadline_ms: i64,
}

impl Tournament {
    /// An empty, available tournament.
    pub fn new(name: impl Into<String>, move_deadline: Duration) -> Self {
        Self {
            name: name.into(),
            status: TournamentStatus::Available,
            players: Vec::new(),
            bench: None,
            matches: Vec::new(),
            round: 0,
            version: 0,
            move_deadline_ms: move_deadline.num_milliseconds(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == TournamentStatus::Available
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }

    pub fn bench(&self) -> Option<&str> {
        self.bench.as_deref()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn ongoing_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.is_ongoing())
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id.0)
    }

    /// Number of rounds paired so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn move_deadline(&self) -> Duration {
        Duration::milliseconds(self.move_deadline_ms)
    }

    /// The ongoing match `player` is playing in, if any.
    pub fn match_for(&self, player: &str) -> Option<&Match> {
        self.ongoing_matches().find(|m| m.involves(player))
    }

    pub fn is_in_active_match(&self, player: &str) -> bool {
        self.match_for(player).is_some()
    }

    pub fn standings(&self) -> Vec<Standing> {
        standings::standings(&self.players)
    }

    /// Add a player with an empty record.
    #[instrument(skip(self), fields(tournament = %self.name))]
    pub fn join(&mut self, player: &str) -> Result<(), TournamentError> {
        if !self.is_available() {
            return Err(TournamentError::TournamentClosed {
                name: self.name.clone(),
            });
        }
        if self.player(player).is_some() {
            return Err(TournamentError::DuplicatePlayer {
                player: player.to_string(),
            });
        }

        self.players.push(Player::new(player));
        self.touch();
        info!("player joined");
        Ok(())
    }

    /// Remove a player who is not in an ongoing match. Removing the benched player clears the bench.
    #[instrument(skip(self), fields(tournament = %self.name))]
    pub fn remove_player(&mut self, player: &str) -> Result<Player, TournamentError> {
        let index = self.player_index(player)?;
        if self.is_in_active_match(player) {
            return Err(TournamentError::PlayerInMatch {
                player: player.to_string(),
            });
        }

        if self.bench.as_deref() == Some(player) {
            self.bench = None;
        }
        let removed = self.players.remove(index);
        self.touch();
        info!("player removed");
        Ok(removed)
    }

    /// Stop accepting players.
    pub fn close(&mut self) -> Result<(), TournamentError> {
        if !self.is_available() {
            return Err(TournamentError::AlreadyClosed {
                name: self.name.clone(),
            });
        }
        self.status = TournamentStatus::Closed;
        self.touch();
        info!(tournament = %self.name, "tournament closed");
        Ok(())
    }

    /// Pair every player into a fresh match, benching one if the count is odd.
    /// Refused while any match is ongoing or with fewer than two players.
    #[instrument(skip(self, rng, now), fields(tournament = %self.name))]
    pub fn pair_round<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Vec<MatchId>, TournamentError> {
        let ongoing = self.ongoing_matches().count();
        if ongoing > 0 {
            return Err(TournamentError::PairingBlocked {
                reason: PairingBlock::MatchesOngoing(ongoing),
            });
        }
        if self.players.len() < 2 {
            return Err(TournamentError::PairingBlocked {
                reason: PairingBlock::NotEnoughPlayers(self.players.len()),
            });
        }

        let names = self.players.iter().map(|player| player.name.clone());
        let pairing = pair_players(names, rng);

        let mut ids = Vec::with_capacity(pairing.pairs.len());
        for (black, white) in pairing.pairs {
            let id = MatchId(self.matches.len());
            self.matches.push(Match::new(id, black, white, now));
            ids.push(id);
        }
        self.bench = pairing.bench;
        self.round += 1;
        self.touch();

        info!(round = self.round, matches = ids.len(), bench = ?self.bench, "round paired");
        Ok(ids)
    }

    /// Legal moves for `player` in their ongoing match. Only the side to move may ask.
    pub fn valid_moves(&self, player: &str) -> Result<LocationList, TournamentError> {
        let game = self.match_for(player).ok_or_else(|| TournamentError::NoOngoingMatch {
            player: player.to_string(),
        })?;
        let color = game.ensure_turn(player)?;
        Ok(game.board().legal_moves(color))
    }

    /// Play a move in `player`'s ongoing match.
    ///
    /// A submission from the side to move after its deadline has passed ends the
    /// match as a forfeit and is reported as a timeout. An accepted move that
    /// leaves neither side able to move ends the match.
    #[instrument(skip(self, now), fields(tournament = %self.name))]
    pub fn submit_move(
        &mut self,
        player: &str,
        location: Location,
        now: DateTime<Utc>,
    ) -> Result<MoveAccepted, TournamentError> {
        let deadline = self.move_deadline();
        let index = self.ongoing_index(player)?;

        let game = &mut self.matches[index];
        let color = game.ensure_turn(player)?;
        if let Some(result) = game.check_timeout(now, deadline) {
            warn!(player, "move submitted after the deadline");
            self.record(&result);
            return Err(MatchError::Timeout { color }.into());
        }

        let accepted = game.submit_move(player, location, now)?;
        let finished = game.check_terminal();
        if let Some(result) = finished {
            self.record(&result);
        } else {
            self.touch();
        }
        Ok(accepted)
    }

    /// End `player`'s ongoing match with `player` as the winner.
    #[instrument(skip(self), fields(tournament = %self.name))]
    pub fn declare_winner(&mut self, player: &str) -> Result<MatchResult, TournamentError> {
        let index = self.ongoing_index(player)?;
        let game = &self.matches[index];
        let winner = game.color_of(player).ok_or_else(|| TournamentError::NoOngoingMatch {
            player: player.to_string(),
        })?;
        let id = game.id();
        self.forfeit(id, !winner)?
            .ok_or(TournamentError::NoOngoingMatch {
                player: player.to_string(),
            })
    }

    /// End match `id` with `loser` forfeiting. Returns None if it had already ended.
    pub fn forfeit(&mut self, id: MatchId, loser: Color) -> Result<Option<MatchResult>, TournamentError> {
        let game = self
            .matches
            .get_mut(id.0)
            .ok_or(TournamentError::MatchNotFound { id })?;
        let result = game.forfeit(loser);
        if let Some(result) = &result {
            self.record(result);
        }
        Ok(result)
    }

    /// Replace a player's win/draw/loss counts, keeping their piece differential.
    #[instrument(skip(self), fields(tournament = %self.name))]
    pub fn override_record(
        &mut self,
        player: &str,
        wins: u32,
        draws: u32,
        losses: u32,
    ) -> Result<Record, TournamentError> {
        let index = self.player_index(player)?;
        let record = &mut self.players[index].record;
        record.wins = wins;
        record.draws = draws;
        record.losses = losses;
        let record = *record;
        self.touch();
        info!(?record, "record overridden");
        Ok(record)
    }

    /// End every ongoing match that is finished or has run out of time, and fold the results.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<MatchResult> {
        let deadline = self.move_deadline();
        let results: Vec<MatchResult> = self
            .matches
            .iter_mut()
            .filter_map(|game| {
                game.check_terminal()
                    .or_else(|| game.check_timeout(now, deadline))
            })
            .collect();

        for result in &results {
            self.record(result);
        }
        results
    }

    fn player_index(&self, player: &str) -> Result<usize, TournamentError> {
        self.players
            .iter()
            .position(|p| p.name == player)
            .ok_or_else(|| TournamentError::PlayerNotFound {
                player: player.to_string(),
            })
    }

    fn ongoing_index(&self, player: &str) -> Result<usize, TournamentError> {
        self.matches
            .iter()
            .position(|m| m.is_ongoing() && m.involves(player))
            .ok_or_else(|| TournamentError::NoOngoingMatch {
                player: player.to_string(),
            })
    }

    fn record(&mut self, result: &MatchResult) {
        standings::fold_result(&mut self.players, result);
        self.touch();
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::{EndReason, Winner};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn with_players(names: &[&str]) -> Tournament {
        let mut tournament = Tournament::new("open", Duration::seconds(5));
        for name in names {
            tournament.join(name).unwrap();
        }
        tournament
    }

    fn loc(row: usize, col: usize) -> Location {
        Location::from_coords(row, col).unwrap()
    }

    #[test]
    fn join_rules() {
        let mut tournament = with_players(&["ada"]);
        assert_eq!(
            tournament.join("ada"),
            Err(TournamentError::DuplicatePlayer {
                player: "ada".to_string()
            })
        );
        tournament.close().unwrap();
        assert_eq!(
            tournament.join("bob"),
            Err(TournamentError::TournamentClosed {
                name: "open".to_string()
            })
        );
        assert_eq!(
            tournament.close(),
            Err(TournamentError::AlreadyClosed {
                name: "open".to_string()
            })
        );
    }

    #[test]
    fn version_tracks_transitions() {
        let mut tournament = with_players(&["ada", "bob"]);
        let before = tournament.version();
        assert!(tournament.join("ada").is_err());
        assert_eq!(tournament.version(), before);

        tournament.pair_round(&mut StdRng::seed_from_u64(0), start()).unwrap();
        assert_eq!(tournament.version(), before + 1);
    }

    #[test]
    fn pairing_is_blocked_while_playing() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut lonely = with_players(&["ada"]);
        assert_eq!(
            lonely.pair_round(&mut rng, start()),
            Err(TournamentError::PairingBlocked {
                reason: PairingBlock::NotEnoughPlayers(1)
            })
        );

        let mut tournament = with_players(&["ada", "bob"]);
        tournament.pair_round(&mut rng, start()).unwrap();
        assert_eq!(
            tournament.pair_round(&mut rng, start()),
            Err(TournamentError::PairingBlocked {
                reason: PairingBlock::MatchesOngoing(1)
            })
        );
        assert_eq!(tournament.round(), 1);
    }

    #[test]
    fn players_in_matches_stay() {
        let mut tournament = with_players(&["ada", "bob", "cy"]);
        tournament.pair_round(&mut StdRng::seed_from_u64(4), start()).unwrap();

        let benched = tournament.bench().unwrap().to_string();
        let playing = tournament.matches()[0].player(Color::Black).to_string();
        assert_eq!(
            tournament.remove_player(&playing),
            Err(TournamentError::PlayerInMatch {
                player: playing.clone()
            })
        );
        assert_eq!(tournament.remove_player(&benched).unwrap().name, benched);
        assert_eq!(tournament.bench(), None);
        assert_eq!(
            tournament.remove_player("nobody"),
            Err(TournamentError::PlayerNotFound {
                player: "nobody".to_string()
            })
        );
    }

    #[test]
    fn valid_moves_for_the_side_to_move_only() {
        let mut tournament = with_players(&["ada", "bob"]);
        tournament.pair_round(&mut StdRng::seed_from_u64(0), start()).unwrap();
        let black = tournament.matches()[0].player(Color::Black).to_string();
        let white = tournament.matches()[0].player(Color::White).to_string();

        assert_eq!(tournament.valid_moves(&black).unwrap().len(), 4);
        assert_eq!(
            tournament.valid_moves(&white),
            Err(TournamentError::Match {
                source: MatchError::OutOfTurn { player: white }
            })
        );
    }

    #[test]
    fn late_submission_forfeits() {
        let mut tournament = with_players(&["ada", "bob"]);
        tournament.pair_round(&mut StdRng::seed_from_u64(0), start()).unwrap();
        let black = tournament.matches()[0].player(Color::Black).to_string();
        let white = tournament.matches()[0].player(Color::White).to_string();

        let late = start() + Duration::seconds(6);
        let err = tournament.submit_move(&black, loc(2, 3), late).unwrap_err();
        assert!(err.is_timeout());

        let game = &tournament.matches()[0];
        assert_eq!(game.winner(), Some(Winner::White));
        assert_eq!(game.result().map(|r| r.reason), Some(EndReason::Timeout));
        assert_eq!(tournament.player(&white).unwrap().record.wins, 1);
        assert_eq!(tournament.player(&black).unwrap().record.losses, 1);
    }

    #[test]
    fn declared_winner_is_recorded_once() {
        let mut tournament = with_players(&["ada", "bob"]);
        tournament.pair_round(&mut StdRng::seed_from_u64(0), start()).unwrap();

        let bob = tournament.matches()[0].color_of("bob").unwrap();
        let result = tournament.declare_winner("bob").unwrap();
        assert_eq!(result.reason, EndReason::Forfeit);
        assert_eq!(result.winner, Winner::from(bob));
        assert_eq!(
            tournament.declare_winner("bob"),
            Err(TournamentError::NoOngoingMatch {
                player: "bob".to_string()
            })
        );
        assert!(tournament.poll(start() + Duration::days(1)).is_empty());
        assert_eq!(tournament.player("bob").unwrap().record.wins, 1);
        assert_eq!(tournament.player("ada").unwrap().record.losses, 1);
    }

    #[test]
    fn override_keeps_differential() {
        let mut tournament = with_players(&["ada"]);
        let record = tournament.override_record("ada", 2, 1, 0).unwrap();
        assert_eq!(record.points(), 7);
        assert_eq!(record.piece_differential, 0);
        assert!(tournament.override_record("bob", 0, 0, 0).is_err());
    }

    #[test]
    fn poll_times_out_stale_matches() {
        let mut tournament = with_players(&["ada", "bob", "cy", "dee"]);
        tournament.pair_round(&mut StdRng::seed_from_u64(2), start()).unwrap();
        assert!(tournament.poll(start() + Duration::seconds(5)).is_empty());

        let results = tournament.poll(start() + Duration::seconds(10));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.winner == Winner::White));
        assert_eq!(tournament.ongoing_matches().count(), 0);
    }
}
