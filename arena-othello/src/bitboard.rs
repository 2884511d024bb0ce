//! Low-level bitboard operations.
//!
//! For efficiency, [`Bitboard`] operations are unchecked and give meaningless
//! results if both players are given a piece on the same location.
//!
//! Under the hood, all these operations work on u64 bitboards. By convention,
//! the MSB is the upper-left of the board, and uses row-major order, so walking
//! from the MSB down visits locations row by row.

use crate::{utils, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

/// Starting bitboard for Black: (3, 4) and (4, 3).
pub const BLACK_START: Bitboard = Bitboard(0x0000_0008_1000_0000);

/// Starting bitboard for White: (3, 3) and (4, 4).
pub const WHITE_START: Bitboard = Bitboard(0x0000_0010_0800_0000);

/// The four corners.
pub const CORNERS: Bitboard = Bitboard(0x8100_0000_0000_0081);

// Everything except column 0 (the high bit of each row byte).
const NOT_FIRST_COLUMN: u64 = 0x7f7f_7f7f_7f7f_7f7f;

// Everything except column 7 (the low bit of each row byte).
const NOT_LAST_COLUMN: u64 = 0xfefe_fefe_fefe_fefe;

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(
            self.into_iter().map(|bit| match bit {
                false => '.',
                true => '#',
            }),
            f,
        )
    }
}

impl Bitboard {
    /// A bitboard with no locations set.
    pub const EMPTY: Self = Self(0);

    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Count the number of empty spaces in the bitboard.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.0.count_zeros() as u8
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One of the eight rays a capture can run along.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// All directions, in the order captures are resolved.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Move every set location one step along this direction.
    /// Locations that would leave the board (or wrap around an edge) are dropped.
    #[inline]
    pub fn shift(self, bitboard: Bitboard) -> Bitboard {
        let bits = bitboard.0;
        Bitboard(match self {
            Direction::NorthWest => (bits << 9) & NOT_LAST_COLUMN,
            Direction::North => bits << 8,
            Direction::NorthEast => (bits << 7) & NOT_FIRST_COLUMN,
            Direction::West => (bits << 1) & NOT_LAST_COLUMN,
            Direction::East => (bits >> 1) & NOT_FIRST_COLUMN,
            Direction::SouthWest => (bits >> 7) & NOT_LAST_COLUMN,
            Direction::South => bits >> 8,
            Direction::SouthEast => (bits >> 9) & NOT_FIRST_COLUMN,
        })
    }
}

/// Score a board as: # my pieces - # opponent pieces.
/// Undefined behavior if both players have a piece at the same location.
#[inline]
pub fn score_absolute_difference(active: Bitboard, opponent: Bitboard) -> i8 {
    (active.0.count_ones() as i8) - (opponent.0.count_ones() as i8)
}

/// Compute a mask of the legal moves for the active player from
/// masks of the active player's pieces and the opponent's pieces.
/// Undefined behavior if an invalid Othello board is specified.
#[inline]
pub fn get_move_mask(active: Bitboard, opponent: Bitboard) -> Bitboard {
    let empties = !(active | opponent);
    let mut moves = Bitboard::EMPTY;

    for &direction in Direction::ALL.iter() {
        // Smear our pieces along the ray through contiguous opponent pieces.
        // A run can hold at most six opponent pieces between two of ours.
        let mut run = direction.shift(active) & opponent;
        for _ in 0..5 {
            run |= direction.shift(run) & opponent;
        }

        // One more step past the run must land on an empty square.
        moves |= direction.shift(run) & empties;
    }

    moves
}

/// Compute the opponent pieces captured by placing a piece at `move_mask`.
/// `move_mask` must be a one-hot bitboard. A ray only captures if its run of
/// opponent pieces is closed off by one of the active player's pieces.
#[inline]
pub fn flip_mask(active: Bitboard, opponent: Bitboard, move_mask: Bitboard) -> Bitboard {
    let mut flips = Bitboard::EMPTY;

    for &direction in Direction::ALL.iter() {
        let mut run = Bitboard::EMPTY;
        let mut cursor = direction.shift(move_mask);

        while !(cursor & opponent).is_empty() {
            run |= cursor;
            cursor = direction.shift(cursor);
        }

        // Walked off the board or onto an empty square: nothing in this ray flips.
        if !(cursor & active).is_empty() {
            flips |= run;
        }
    }

    flips
}

/// Compute an updated board after a given move is made, returning new bitboards
/// for the active player and the opponent. `move_mask` must be a one-hot bitboard
/// indicating the move location. Undefined behavior if an invalid Othello board
/// or `move_mask` is provided.
#[inline]
pub fn apply_move(
    active: Bitboard,
    opponent: Bitboard,
    move_mask: Bitboard,
) -> (Bitboard, Bitboard) {
    let flips = flip_mask(active, opponent, move_mask);

    let new_active = (active ^ flips) | move_mask;
    let new_opponent = opponent ^ flips;

    (new_active, new_opponent)
}

/// Iterator for the bits in a [`Bitboard`].
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    remaining: usize,
    bitboard: Bitboard,
}

impl Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let bitmask = Bitboard::from(1u64 << (self.remaining - 1));
        let bit = !(self.bitboard & bitmask).is_empty();
        self.remaining -= 1;

        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Bits {}

/// Iterate over the bits in row-major order.
impl IntoIterator for Bitboard {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits {
            remaining: NUM_SPACES,
            bitboard: self,
        }
    }
}
