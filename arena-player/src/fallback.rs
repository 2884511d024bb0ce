//! Move choices that need no search, used when a search selects nothing.

use arena_othello::{Board, Color, Location};
use rand::seq::IteratorRandom;
use rand::Rng;
use std::cmp::Reverse;

/// The legal move that flips the most opponent pieces.
/// Ties go to the earliest move in row-major order.
pub fn best_capture(board: Board, color: Color) -> Option<Location> {
    board
        .legal_moves(color)
        .min_by_key(|&mv| Reverse(board.flips(mv, color).count_occupied()))
}

/// A uniformly random legal move.
pub fn random_move<R: Rng + ?Sized>(board: Board, color: Color, rng: &mut R) -> Option<Location> {
    board.legal_moves(color).choose(rng)
}
