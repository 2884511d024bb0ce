//! Errors for match and tournament transitions.
//!
//! Every rejection leaves the match or tournament exactly as it was.

use arena_othello::{Color, Location};
use derive_more::{Display, Error};

use crate::matches::MatchId;

/// Rejections from a single match.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum MatchError {
    #[display(fmt = "match is not ongoing")]
    MatchNotOngoing,
    #[display(fmt = "{} is not playing in this match", player)]
    NotInMatch { player: String },
    #[display(fmt = "it is not {}'s turn", player)]
    OutOfTurn { player: String },
    #[display(fmt = "{} is not a legal move for {}", location, color)]
    IllegalMove { location: Location, color: Color },
    #[display(fmt = "{} ran out of time and forfeits", color)]
    Timeout { color: Color },
}

/// Rejections from tournament and registry transitions.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum TournamentError {
    #[display(fmt = "tournament {} already exists", name)]
    TournamentExists { name: String },
    #[display(fmt = "tournament {} not found", name)]
    TournamentNotFound { name: String },
    #[display(fmt = "tournament {} is closed", name)]
    TournamentClosed { name: String },
    #[display(fmt = "tournament {} is already closed", name)]
    AlreadyClosed { name: String },
    #[display(fmt = "player {} has already joined", player)]
    DuplicatePlayer { player: String },
    #[display(fmt = "player {} not found", player)]
    PlayerNotFound { player: String },
    #[display(fmt = "player {} is in an ongoing match", player)]
    PlayerInMatch { player: String },
    #[display(fmt = "player {} has no ongoing match", player)]
    NoOngoingMatch { player: String },
    #[display(fmt = "match {} not found", id)]
    MatchNotFound { id: MatchId },
    #[display(fmt = "cannot pair players: {}", reason)]
    PairingBlocked { reason: PairingBlock },
    #[display(fmt = "{}", source)]
    Match { source: MatchError },
}

/// Why a round could not be paired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum PairingBlock {
    #[display(fmt = "{} matches are still ongoing", _0)]
    MatchesOngoing(usize),
    #[display(fmt = "only {} players have joined", _0)]
    NotEnoughPlayers(usize),
}

impl From<MatchError> for TournamentError {
    fn from(source: MatchError) -> Self {
        TournamentError::Match { source }
    }
}

impl TournamentError {
    /// Whether this is a forfeiture caused by a late submission.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            TournamentError::Match {
                source: MatchError::Timeout { .. }
            }
        )
    }
}
