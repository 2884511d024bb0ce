//! `arena-othello` is the rules engine behind the arena tournament runner.
//!
//! This package implements two levels of abstraction:
//!
//!  - [`bitboard`] contains the raw, unchecked operations for working with Othello boards.
//!    These are fast, but may result in inconsistent state if their contracts are not manually checked.
//!  - [`Board`] is a safe, copyable board value with the full rules: legal moves,
//!    captures, passes and terminal detection, in terms of [`Color`]s and [`Location`]s.
//!
//! Boards convert losslessly to and from the integer [`Grid`] used by external
//! collaborators (`0` empty, `1` white, `-1` black).

pub mod bitboard;
pub mod test_utils;

mod board;
mod codec;
mod color;
mod location;
mod utils;

pub use board::*;
pub use codec::*;
pub use color::*;
pub use location::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
