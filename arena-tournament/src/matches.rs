//! The lifecycle of a single match.
//!
//! A match starts `ongoing` with the opening board and black to move, and moves
//! to `ended` exactly once: by reaching a terminal board, by the side to move
//! running out of time, or by forfeit. The [`MatchResult`] is handed out only
//! by the call that performs that transition.

use arena_othello::{Board, Color, Location};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

use crate::error::MatchError;

/// Index of a match within its tournament.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub usize);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Ongoing,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Winner::Black,
            Color::White => Winner::White,
        }
    }
}

impl Winner {
    /// The winner of a finished board: more pieces wins.
    pub fn of_board(board: Board) -> Self {
        board.leader().map_or(Winner::Draw, Winner::from)
    }
}

/// How a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Neither side could move.
    Completed,
    /// The side to move exceeded the move deadline.
    Timeout,
    /// A side was declared the loser: by an administrator, or for an invalid submission.
    Forfeit,
}

/// One color's result in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// Emitted once when a match ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,
    pub black_player: String,
    pub white_player: String,
    pub winner: Winner,
    pub black_score: u8,
    pub white_score: u8,
    pub reason: EndReason,
}

impl MatchResult {
    pub fn player(&self, color: Color) -> &str {
        match color {
            Color::Black => &self.black_player,
            Color::White => &self.white_player,
        }
    }

    pub fn outcome_for(&self, color: Color) -> Outcome {
        match self.winner {
            Winner::Draw => Outcome::Draw,
            winner if winner == Winner::from(color) => Outcome::Win,
            _ => Outcome::Loss,
        }
    }

    /// Own pieces minus opponent pieces for `color`.
    pub fn differential_for(&self, color: Color) -> i32 {
        let difference = self.black_score as i32 - self.white_score as i32;
        match color {
            Color::Black => difference,
            Color::White => -difference,
        }
    }
}

/// What an accepted move did to the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAccepted {
    pub next_turn: Color,
    /// The opponent had no legal reply, so the mover moves again.
    pub forced_pass: bool,
    pub flipped: u8,
}

/// One game between two named players.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Match {
    id: MatchId,
    black_player: String,
    white_player: String,
    board: Board,
    turn: Color,
    status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    winner: Option<Winner>,
    last_move_at: DateTime<Utc>,
    result: Option<MatchResult>,
}

impl Match {
    /// A fresh match on the opening board, black to move, with black's clock starting at `now`.
    pub fn new(
        id: MatchId,
        black_player: impl Into<String>,
        white_player: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            black_player: black_player.into(),
            white_player: white_player.into(),
            board: Board::new(),
            turn: Color::Black,
            status: MatchStatus::Ongoing,
            winner: None,
            last_move_at: now,
            result: None,
        }
    }

    /// A match resumed from an arbitrary position, with `turn`'s clock starting at `now`.
    pub fn from_position(
        id: MatchId,
        black_player: impl Into<String>,
        white_player: impl Into<String>,
        board: Board,
        turn: Color,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            board,
            turn,
            ..Self::new(id, black_player, white_player, now)
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == MatchStatus::Ongoing
    }

    pub fn last_move_at(&self) -> DateTime<Utc> {
        self.last_move_at
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn player(&self, color: Color) -> &str {
        match color {
            Color::Black => &self.black_player,
            Color::White => &self.white_player,
        }
    }

    /// The color `player` plays in this match, if they are in it.
    pub fn color_of(&self, player: &str) -> Option<Color> {
        if player == self.black_player {
            Some(Color::Black)
        } else if player == self.white_player {
            Some(Color::White)
        } else {
            None
        }
    }

    pub fn involves(&self, player: &str) -> bool {
        self.color_of(player).is_some()
    }

    /// Check that `player` may move now, returning their color.
    pub fn ensure_turn(&self, player: &str) -> Result<Color, MatchError> {
        if !self.is_ongoing() {
            return Err(MatchError::MatchNotOngoing);
        }
        let color = self.color_of(player).ok_or_else(|| MatchError::NotInMatch {
            player: player.to_string(),
        })?;
        if color != self.turn {
            return Err(MatchError::OutOfTurn {
                player: player.to_string(),
            });
        }
        Ok(color)
    }

    /// Play `location` for `player`.
    ///
    /// On success the board advances, the deadline clock restarts at `now` and
    /// the turn passes to the opponent, unless the opponent has no legal move,
    /// in which case the mover keeps it.
    #[instrument(level = "debug", skip(self, now), fields(id = %self.id))]
    pub fn submit_move(
        &mut self,
        player: &str,
        location: Location,
        now: DateTime<Utc>,
    ) -> Result<MoveAccepted, MatchError> {
        let color = self.ensure_turn(player)?;
        if !self.board.is_legal(location, color) {
            return Err(MatchError::IllegalMove { location, color });
        }

        let flipped = self.board.flips(location, color).count_occupied();
        self.board = self.board.apply_move(location, color);
        self.last_move_at = now;

        let forced_pass = !self.board.has_moves(!color);
        self.turn = if forced_pass { color } else { !color };
        debug!(%location, flipped, forced_pass, "move accepted");

        Ok(MoveAccepted {
            next_turn: self.turn,
            forced_pass,
            flipped,
        })
    }

    /// End the match if the side to move has been idle longer than `deadline`.
    /// The side to move forfeits and the current piece counts are recorded.
    pub fn check_timeout(&mut self, now: DateTime<Utc>, deadline: Duration) -> Option<MatchResult> {
        if !self.is_ongoing() || now - self.last_move_at <= deadline {
            return None;
        }
        let winner = Winner::from(!self.turn);
        self.end(winner, EndReason::Timeout)
    }

    /// End the match if neither side can move. More pieces wins; equal counts draw.
    pub fn check_terminal(&mut self) -> Option<MatchResult> {
        if !self.is_ongoing() || !self.board.is_terminal() {
            return None;
        }
        self.end(Winner::of_board(self.board), EndReason::Completed)
    }

    /// End the match with `loser` forfeiting.
    pub fn forfeit(&mut self, loser: Color) -> Option<MatchResult> {
        self.end(Winner::from(!loser), EndReason::Forfeit)
    }

    fn end(&mut self, winner: Winner, reason: EndReason) -> Option<MatchResult> {
        if !self.is_ongoing() {
            return None;
        }
        let (black_score, white_score) = self.board.score();
        let result = MatchResult {
            match_id: self.id,
            black_player: self.black_player.clone(),
            white_player: self.white_player.clone(),
            winner,
            black_score,
            white_score,
            reason,
        };
        info!(id = %self.id, ?winner, ?reason, black_score, white_score, "match ended");

        self.status = MatchStatus::Ended;
        self.winner = Some(winner);
        self.result = Some(result.clone());
        Some(result)
    }
}
