//! Static evaluation of positions.
//!
//! Scores are from one color's point of view and antisymmetric: the other
//! color always gets exactly the negated score, which negamax relies on.

use arena_othello::bitboard::{Bitboard, CORNERS};
use arena_othello::{Board, Color, LocationList};

/// Empty-square count at or below which the endgame weighting applies.
pub const ENDGAME_EMPTIES: u8 = 16;

/// Per-location weights, indexed `[row][column]`.
pub const POSITION_WEIGHTS: [[i32; 8]; 8] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [5, -2, -1, -1, -1, -1, -2, 5],
    [10, -2, -1, -1, -1, -1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

const MOBILITY_WEIGHT: f64 = 10.0;
const CORNER_WEIGHT: f64 = 50.0;
const CORNER_ADJACENCY_WEIGHT: f64 = 25.0;
const ENDGAME_PIECE_WEIGHT: f64 = 5.0;

// Each corner with the three squares touching it:
// (0,0): (0,1) (1,0) (1,1); (0,7): (0,6) (1,7) (1,6);
// (7,0): (6,0) (7,1) (6,1); (7,7): (7,6) (6,7) (6,6).
const CORNER_NEIGHBORHOODS: [(u64, u64); 4] = [
    (1 << 63, 0x40c0_0000_0000_0000),
    (1 << 56, 0x0203_0000_0000_0000),
    (1 << 7, 0x0000_0000_0000_c040),
    (1, 0x0000_0000_0000_0302),
];

/// Which weighting a position is scored with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Opening and midgame: position and mobility dominate.
    Midgame,
    /// At most [`ENDGAME_EMPTIES`] empty squares: material dominates.
    Endgame,
}

impl Phase {
    pub fn of(board: Board) -> Self {
        if board.empties() <= ENDGAME_EMPTIES {
            Phase::Endgame
        } else {
            Phase::Midgame
        }
    }
}

/// Score `board` for `color`; higher is better for `color`.
pub fn evaluate(board: Board, color: Color) -> f64 {
    let own = board.bitboard(color);
    let other = board.bitboard(!color);

    let positional = positional(own, other) as f64;
    let mobility = MOBILITY_WEIGHT
        * (board.legal_moves(color).len() as f64 - board.legal_moves(!color).len() as f64);
    let corners = CORNER_WEIGHT * corner_control(own, other) as f64;
    let pieces = board.piece_difference(color) as f64;

    match Phase::of(board) {
        Phase::Endgame => {
            let pieces = ENDGAME_PIECE_WEIGHT * pieces;
            2.0 * pieces + 0.5 * positional + mobility + corners
        }
        Phase::Midgame => {
            let adjacency = CORNER_ADJACENCY_WEIGHT * corner_adjacency(own, other) as f64;
            positional + 2.0 * mobility + corners + adjacency + pieces
        }
    }
}

/// Sum of location weights for `own` minus the sum for `other`.
fn positional(own: Bitboard, other: Bitboard) -> i32 {
    weight_sum(own) - weight_sum(other)
}

fn weight_sum(pieces: Bitboard) -> i32 {
    LocationList::from(pieces)
        .map(|loc| {
            let (row, col) = loc.to_coords();
            POSITION_WEIGHTS[row][col]
        })
        .sum()
}

/// Corners held by `own` minus corners held by `other`.
fn corner_control(own: Bitboard, other: Bitboard) -> i32 {
    (own & CORNERS).count_occupied() as i32 - (other & CORNERS).count_occupied() as i32
}

/// Pieces next to a still-empty corner: -1 for each of ours, +1 for each of theirs.
fn corner_adjacency(own: Bitboard, other: Bitboard) -> i32 {
    let occupied = own | other;
    CORNER_NEIGHBORHOODS
        .iter()
        .filter(|&&(corner, _)| (occupied & Bitboard::from(corner)).is_empty())
        .map(|&(_, neighbors)| {
            let neighbors = Bitboard::from(neighbors);
            (other & neighbors).count_occupied() as i32 - (own & neighbors).count_occupied() as i32
        })
        .sum()
}
