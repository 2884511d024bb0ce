//! Random self-play, used to sample reachable positions.

use crate::{Board, Color, Location};
use rand::seq::IteratorRandom;
use rand::Rng;

/// A reachable position and the color to move in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub to_move: Color,
    /// The move played from this position, or None if the side passed or the game ended.
    pub played: Option<Location>,
}

/// Play uniformly random legal moves from the opening until the game ends,
/// returning every position visited (the final one has `played == None`).
pub fn random_playout<R: Rng + ?Sized>(rng: &mut R) -> Vec<Position> {
    let mut positions = Vec::new();
    let mut board = Board::new();
    let mut to_move = Color::Black;

    loop {
        if board.is_terminal() {
            positions.push(Position {
                board,
                to_move,
                played: None,
            });
            return positions;
        }

        let played = board.legal_moves(to_move).choose(rng);
        positions.push(Position {
            board,
            to_move,
            played,
        });

        if let Some(loc) = played {
            board = board.apply_move(loc, to_move);
        }
        to_move = !to_move;
    }
}
