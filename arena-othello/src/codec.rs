//! The integer grid encoding shared with external collaborators.
//!
//! Cells are `0` for empty, `1` for white and `-1` for black. Moves travel as an
//! `(x, y)` pair where `x` is the row and `y` the column, both 0-indexed.

use crate::board::Board;
use crate::location::Location;
use crate::{Color, EDGE_LENGTH};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Grid value of an empty cell.
pub const EMPTY_CELL: i8 = 0;

/// A board as an 8x8 array of cell values, indexed `[row][column]`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid(pub [[i8; EDGE_LENGTH]; EDGE_LENGTH]);

/// Errors from decoding boards and moves.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum GridError {
    #[display(fmt = "cell ({}, {}) holds {}, expected -1, 0 or 1", row, col, value)]
    InvalidCell { row: usize, col: usize, value: i8 },
    #[display(fmt = "unexpected board character {:?}", character)]
    InvalidCharacter { character: char },
    #[display(fmt = "expected 64 cells, found {}", length)]
    WrongLength { length: usize },
    #[display(fmt = "move ({}, {}) is off the board", x, y)]
    OutOfBounds { x: i64, y: i64 },
    #[display(fmt = "both colors occupy the same location")]
    Overlap,
}

impl Board {
    /// Encode this board as an integer grid.
    pub fn to_grid(self) -> Grid {
        let mut grid = [[EMPTY_CELL; EDGE_LENGTH]; EDGE_LENGTH];
        for (index, cell) in self.cells().enumerate() {
            if let Some(color) = cell {
                grid[index / EDGE_LENGTH][index % EDGE_LENGTH] = color.sign();
            }
        }
        Grid(grid)
    }

    /// Decode an integer grid, rejecting any cell outside {-1, 0, 1}.
    pub fn from_grid(grid: &Grid) -> Result<Self, GridError> {
        let mut board = Board::empty();
        for (row, cells) in grid.0.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == EMPTY_CELL {
                    continue;
                }
                let color =
                    Color::from_sign(value).ok_or(GridError::InvalidCell { row, col, value })?;
                if let Some(loc) = Location::from_coords(row, col) {
                    board = board.with_cell(loc, Some(color));
                }
            }
        }
        Ok(board)
    }
}

impl From<Board> for Grid {
    fn from(board: Board) -> Self {
        board.to_grid()
    }
}

impl TryFrom<Grid> for Board {
    type Error = GridError;

    fn try_from(grid: Grid) -> Result<Self, Self::Error> {
        Board::from_grid(&grid)
    }
}

/// Decode an external `(x, y)` move.
pub fn decode_move(x: i64, y: i64) -> Result<Location, GridError> {
    if x < 0 || y < 0 {
        return Err(GridError::OutOfBounds { x, y });
    }
    Location::from_coords(x as usize, y as usize).ok_or(GridError::OutOfBounds { x, y })
}

/// Encode a move as its external `(x, y)` pair.
pub fn encode_move(loc: Location) -> (i64, i64) {
    let (row, col) = loc.to_coords();
    (row as i64, col as i64)
}
