//! Text helpers shared by the board and bitboard printers.

use crate::EDGE_LENGTH;
use std::fmt::{self, Formatter};

/// Write one character per cell, row-major, under a header of column numbers and
/// with each row prefixed by its number. Fewer or more than 64 cells is a
/// formatting error.
pub fn format_grid<T: Iterator<Item = char>>(mut cells: T, f: &mut Formatter) -> fmt::Result {
    f.write_str("   0 1 2 3 4 5 6 7")?;

    for row in 0..EDGE_LENGTH {
        write!(f, "\n {} ", row)?;
        for _ in 0..EDGE_LENGTH {
            let cell = cells.next().ok_or(fmt::Error)?;
            write!(f, "{} ", cell)?;
        }
    }

    if cells.next().is_some() {
        return Err(fmt::Error);
    }
    Ok(())
}
