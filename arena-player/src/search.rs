//! Depth-limited negamax with alpha-beta pruning.
//!
//! Leaves and positions where the side to move has no legal move are scored
//! with [`evaluate`]; passes are not searched through.

use crate::evaluator::evaluate;
use arena_othello::{Board, Color, Location};
use arrayvec::ArrayVec;
use tracing::{debug, instrument};

/// What a root search produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchOutcome {
    /// The best move and its negamax score for the mover.
    Found { location: Location, score: f64 },
    /// The side to move has no legal move and must pass.
    NoLegalMoves,
    /// Legal moves exist but the search selected none of them.
    Degenerate,
}

impl SearchOutcome {
    /// The selected move, if any.
    pub fn location(self) -> Option<Location> {
        match self {
            SearchOutcome::Found { location, .. } => Some(location),
            _ => None,
        }
    }
}

/// Search depth in plies for a board with `empties` empty squares.
pub fn depth_for(empties: u8) -> u8 {
    match empties {
        e if e > 50 => 4,
        e if e > 20 => 5,
        e if e > 12 => 6,
        e => e.min(8),
    }
}

/// Search `board` for `color` to the depth chosen by [`depth_for`].
pub fn search(board: Board, color: Color) -> SearchOutcome {
    search_to_depth(board, color, depth_for(board.empties()))
}

/// Search `board` for `color` to exactly `depth` plies.
///
/// Root moves are tried in row-major order and a later move only replaces the
/// current best if it scores strictly higher, so ties go to the earliest move.
/// A depth of zero selects nothing and reports [`SearchOutcome::Degenerate`].
#[instrument(level = "debug", skip(board))]
pub fn search_to_depth(board: Board, color: Color, depth: u8) -> SearchOutcome {
    let moves = board.legal_moves(color);
    if moves.is_empty() {
        return SearchOutcome::NoLegalMoves;
    }
    if depth == 0 {
        return SearchOutcome::Degenerate;
    }

    let mut alpha = f64::NEG_INFINITY;
    let mut best: Option<(Location, f64)> = None;

    for location in moves {
        let child = board.apply_move(location, color);
        let score = -window(child, !color, depth - 1, f64::NEG_INFINITY, -alpha);

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((location, score));
        }
        if score > alpha {
            alpha = score;
        }
    }

    match best {
        Some((location, score)) => {
            debug!(%location, score, "search finished");
            SearchOutcome::Found { location, score }
        }
        None => SearchOutcome::Degenerate,
    }
}

/// Negamax value of `board` for `color`, clamped to the `[alpha, beta]` window.
pub fn window(board: Board, color: Color, depth: u8, alpha: f64, beta: f64) -> f64 {
    window_fastest_first(board, color, depth, alpha, beta)
}

/// Window search, using "fastest first" move ordering which first
/// explores moves where the opponent has the fewest legal moves.
fn window_fastest_first(board: Board, color: Color, depth: u8, mut alpha: f64, beta: f64) -> f64 {
    // Below this depth, stop sorting moves.
    const MIN_SORT_DEPTH: u8 = 3;

    if depth < MIN_SORT_DEPTH {
        return window_unsorted(board, color, depth, alpha, beta);
    }

    let moves = board.legal_moves(color);
    if moves.is_empty() {
        return evaluate(board, color);
    }

    // Precompute all children, then visit them by lowest opponent mobility first
    let mut children: ArrayVec<[Board; 64]> =
        moves.map(|mv| board.apply_move(mv, color)).collect();
    children.sort_by_key(|child| child.legal_moves(!color).len());

    for child in children {
        let score = -window_fastest_first(child, !color, depth - 1, -beta, -alpha);

        // Fail high: the opponent already has a line that avoids this position.
        if score >= beta {
            return beta;
        }

        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

/// Window search without move ordering, which is faster near the leaves.
fn window_unsorted(board: Board, color: Color, depth: u8, mut alpha: f64, beta: f64) -> f64 {
    let moves = board.legal_moves(color);
    if depth == 0 || moves.is_empty() {
        return evaluate(board, color);
    }

    for mv in moves {
        let score = -window_unsorted(board.apply_move(mv, color), !color, depth - 1, -beta, -alpha);

        if score >= beta {
            return beta;
        }

        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
