//! `arena-tournament` runs Othello tournaments.
//!
//! A [`Tournament`] owns its players and [`Match`]es. Matches advance through
//! move submissions, end by completion, timeout or forfeit, and their results
//! fold into each player's [`Record`]. Rounds are paired at random with an odd
//! player benched. The [`driver`] plays whole rounds between automated
//! contestants, one task per match.

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod matches;
pub mod pairing;
pub mod registry;
pub mod standings;
pub mod tournament;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ArenaConfig, ConfigError, ContestantConfig, ContestantKind};
pub use driver::{play_round, DriverError, Roster, RoundSummary};
pub use error::{MatchError, PairingBlock, TournamentError};
pub use matches::{EndReason, Match, MatchId, MatchResult, MatchStatus, MoveAccepted, Outcome, Winner};
pub use pairing::{pair_players, Pairing};
pub use registry::{Registry, SharedTournament, TournamentSummary};
pub use standings::{Player, Record, Standing};
pub use tournament::{Tournament, TournamentStatus};
