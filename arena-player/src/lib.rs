//! `arena-player` chooses moves for automated tournament contestants.
//!
//! [`choose_move`] runs a depth-limited alpha-beta [`search`] over the
//! heuristic in [`evaluator`], and falls back to [`fallback::best_capture`]
//! and then [`fallback::random_move`] if the search selects nothing.
//! The [`contestants`] module wraps move choice behind an async interface
//! for the tournament driver.

pub mod contestants;
pub mod evaluator;
pub mod fallback;
pub mod search;

pub use search::SearchOutcome;

use arena_othello::{Board, Color, Location};
use rand::Rng;
use tracing::warn;

/// Choose a move for `color` on `board`.
///
/// Returns None only when `color` has no legal move; otherwise the result is
/// always one of `board.legal_moves(color)`.
pub fn choose_move<R: Rng + ?Sized>(board: Board, color: Color, rng: &mut R) -> Option<Location> {
    resolve(board, color, search::search(board, color), rng)
}

/// Turn a search outcome into a move, recovering from a degenerate search.
pub fn resolve<R: Rng + ?Sized>(
    board: Board,
    color: Color,
    outcome: SearchOutcome,
    rng: &mut R,
) -> Option<Location> {
    match outcome {
        SearchOutcome::Found { location, .. } => Some(location),
        SearchOutcome::NoLegalMoves => None,
        SearchOutcome::Degenerate => {
            warn!(%color, empties = board.empties(), "search selected no move, falling back");
            fallback::best_capture(board, color)
                .or_else(|| fallback::random_move(board, color, rng))
        }
    }
}
