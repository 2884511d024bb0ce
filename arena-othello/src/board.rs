//! The Othello rules, on a copyable pair of bitboards.
//!
//! A [`Board`] is a value: every rule that changes the position returns a new
//! board and leaves the original untouched, so search can branch on it freely.

use crate::bitboard::{self, Bitboard, BLACK_START, WHITE_START};
use crate::codec::{Grid, GridError};
use crate::location::{Location, LocationList};
use crate::{utils, Color, NUM_SPACES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete contents of an 8x8 Othello board.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "Grid", try_from = "Grid")]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Default for Board {
    /// Gets the standard opening position.
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard opening: white on (3, 3) and (4, 4), black on (3, 4) and (4, 3).
    pub const fn new() -> Self {
        Self {
            black: BLACK_START,
            white: WHITE_START,
        }
    }

    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Self {
            black: Bitboard::EMPTY,
            white: Bitboard::EMPTY,
        }
    }

    /// Build a board from one bitboard per color.
    /// Fails if both colors claim the same location.
    pub fn from_bitboards(black: Bitboard, white: Bitboard) -> Result<Self, GridError> {
        if !(black & white).is_empty() {
            return Err(GridError::Overlap);
        }
        Ok(Self { black, white })
    }

    /// The pieces belonging to `color`.
    #[inline]
    pub fn bitboard(self, color: Color) -> Bitboard {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// The (active, opponent) bitboards as seen by `color`.
    #[inline]
    fn perspective(self, color: Color) -> (Bitboard, Bitboard) {
        match color {
            Color::Black => (self.black, self.white),
            Color::White => (self.white, self.black),
        }
    }

    /// Rebuild a board from the (active, opponent) bitboards seen by `color`.
    #[inline]
    fn from_perspective(color: Color, active: Bitboard, opponent: Bitboard) -> Self {
        match color {
            Color::Black => Self {
                black: active,
                white: opponent,
            },
            Color::White => Self {
                black: opponent,
                white: active,
            },
        }
    }

    /// Who occupies `loc`, if anyone.
    #[inline]
    pub fn at(self, loc: Location) -> Option<Color> {
        let mask = loc.bitboard();
        if !(self.black & mask).is_empty() {
            Some(Color::Black)
        } else if !(self.white & mask).is_empty() {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Place (or clear) a single cell, ignoring the rules.
    /// Used to set up positions; games should only advance through [`Board::apply_move`].
    pub fn with_cell(self, loc: Location, cell: Option<Color>) -> Self {
        let mask = loc.bitboard();
        let mut board = Self {
            black: self.black & !mask,
            white: self.white & !mask,
        };
        match cell {
            Some(Color::Black) => board.black |= mask,
            Some(Color::White) => board.white |= mask,
            None => {}
        }
        board
    }

    /// Get the list of legal moves for `color`.
    /// An empty list is a legal state: `color` must pass.
    #[inline]
    pub fn legal_moves(self, color: Color) -> LocationList {
        let (active, opponent) = self.perspective(color);
        bitboard::get_move_mask(active, opponent).into()
    }

    /// Whether `color` has at least one legal move.
    #[inline]
    pub fn has_moves(self, color: Color) -> bool {
        !self.legal_moves(color).is_empty()
    }

    /// Whether placing at `loc` is legal for `color`.
    #[inline]
    pub fn is_legal(self, loc: Location, color: Color) -> bool {
        self.legal_moves(color).contains(loc)
    }

    /// The opponent pieces that `color` would capture by playing `loc`.
    #[inline]
    pub fn flips(self, loc: Location, color: Color) -> Bitboard {
        let (active, opponent) = self.perspective(color);
        bitboard::flip_mask(active, opponent, loc.bitboard())
    }

    /// Place a piece for `color` at `loc` and flip every captured run.
    ///
    /// `loc` must be one of [`Board::legal_moves`] for `color`; this is not checked.
    /// The board is returned by value and `self` is unchanged.
    #[inline]
    pub fn apply_move(self, loc: Location, color: Color) -> Self {
        let (active, opponent) = self.perspective(color);
        let (active, opponent) = bitboard::apply_move(active, opponent, loc.bitboard());
        Self::from_perspective(color, active, opponent)
    }

    /// True iff neither color has a legal move.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.has_moves(Color::Black) && !self.has_moves(Color::White)
    }

    /// Piece counts as (black, white).
    #[inline]
    pub fn score(self) -> (u8, u8) {
        (self.black.count_occupied(), self.white.count_occupied())
    }

    /// Number of pieces `color` has on the board.
    #[inline]
    pub fn count(self, color: Color) -> u8 {
        self.bitboard(color).count_occupied()
    }

    /// Score the board as: # pieces of `color` - # pieces of the other color.
    #[inline]
    pub fn piece_difference(self, color: Color) -> i8 {
        let (active, opponent) = self.perspective(color);
        bitboard::score_absolute_difference(active, opponent)
    }

    /// Get a mask indicating where the occupied spaces are.
    #[inline]
    pub fn occupied_mask(self) -> Bitboard {
        self.black | self.white
    }

    /// Number of empty spaces.
    #[inline]
    pub fn empties(self) -> u8 {
        self.occupied_mask().count_empty()
    }

    /// Whether every space is occupied.
    #[inline]
    pub fn is_full(self) -> bool {
        self.empties() == 0
    }

    /// The color with more pieces, or None on equal counts.
    pub fn leader(self) -> Option<Color> {
        let (black, white) = self.score();
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Option<Color>> {
        (0..NUM_SPACES as u8)
            .filter_map(Location::from_index)
            .map(move |loc| self.at(loc))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::format_grid(
            self.cells().map(|cell| match cell {
                None => '.',
                Some(Color::Black) => 'X',
                Some(Color::White) => 'O',
            }),
            f,
        )
    }
}

/// Parse a board from 64 cell characters in row-major order, ignoring whitespace.
/// `X`/`B` is black, `O`/`W` is white, `.`/`-` is empty.
impl std::str::FromStr for Board {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != NUM_SPACES {
            return Err(GridError::WrongLength {
                length: cells.len(),
            });
        }

        let mut board = Board::empty();
        for (index, &character) in cells.iter().enumerate() {
            let cell = match character.to_ascii_uppercase() {
                'X' | 'B' => Some(Color::Black),
                'O' | 'W' => Some(Color::White),
                '.' | '-' => None,
                _ => return Err(GridError::InvalidCharacter { character }),
            };
            if let Some(loc) = Location::from_index(index as u8) {
                board = board.with_cell(loc, cell);
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(row: usize, col: usize) -> Location {
        Location::from_coords(row, col).unwrap()
    }

    #[test]
    fn opening_moves_for_black() {
        let moves: Vec<(usize, usize)> = Board::new()
            .legal_moves(Color::Black)
            .map(Location::to_coords)
            .collect();
        assert_eq!(moves, vec![(2, 3), (3, 2), (4, 5), (5, 4)]);
    }

    #[test]
    fn opening_moves_for_white() {
        let moves: Vec<(usize, usize)> = Board::new()
            .legal_moves(Color::White)
            .map(Location::to_coords)
            .collect();
        assert_eq!(moves, vec![(2, 4), (3, 5), (4, 2), (5, 3)]);
    }

    #[test]
    fn apply_move_leaves_original_untouched() {
        let board = Board::new();
        let next = board.apply_move(loc(2, 3), Color::Black);
        assert_eq!(board, Board::new());
        assert_eq!(next.at(loc(2, 3)), Some(Color::Black));
        assert_eq!(next.at(loc(3, 3)), Some(Color::Black));
        assert_eq!(next.score(), (4, 1));
    }

    #[test]
    fn captures_in_several_directions() {
        let board: Board = "
            ........
            XXXXX...
            .OOO....
            XO.O....
            .OOO....
            XXXXX...
            ........
            ........"
            .parse()
            .unwrap();

        let next = board.apply_move(loc(3, 2), Color::Black);
        // Every ray but east is closed by black; east runs into an empty square.
        for &(row, col) in &[(2, 1), (2, 2), (2, 3), (3, 1), (4, 1), (4, 2), (4, 3)] {
            assert_eq!(next.at(loc(row, col)), Some(Color::Black), "({}, {})", row, col);
        }
        assert_eq!(next.at(loc(3, 3)), Some(Color::White));
    }

    #[test]
    fn full_board_is_terminal() {
        let board: Board = format!("{}{}", "X".repeat(32), "O".repeat(32))
            .parse()
            .unwrap();
        assert!(board.is_full());
        assert!(board.is_terminal());
        assert_eq!(board.leader(), None);
    }

    #[test]
    fn terminal_with_empty_squares() {
        // Only black pieces: neither side can capture anything.
        let board: Board = "
            XX......
            XX......
            ........
            ........
            ........
            ........
            ........
            ......XX"
            .parse()
            .unwrap();
        assert!(!board.is_full());
        assert!(board.is_terminal());
        assert_eq!(board.leader(), Some(Color::Black));
    }

    #[test]
    fn forced_pass_and_early_end() {
        let board: Board = format!("XO{}", ".".repeat(62)).parse().unwrap();
        let black_moves = board.legal_moves(Color::Black);
        assert_eq!(black_moves.len(), 1);
        assert!(black_moves.contains(loc(0, 2)));
        assert!(!board.has_moves(Color::White));

        let next = board.apply_move(loc(0, 2), Color::Black);
        assert!(next.is_terminal());
        assert_eq!(next.score(), (3, 0));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(GridError::WrongLength { length: 2 })
        );
        assert_eq!(
            "Z".repeat(64).parse::<Board>(),
            Err(GridError::InvalidCharacter { character: 'Z' })
        );
    }

    #[test]
    fn from_bitboards_rejects_overlap() {
        let both = loc(0, 0).bitboard();
        assert_eq!(Board::from_bitboards(both, both), Err(GridError::Overlap));
    }
}
