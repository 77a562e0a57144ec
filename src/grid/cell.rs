//! Cell identifiers on the 5×5 grid

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 25;

/// Width (and height) of the square board.
pub const GRID_SIDE: usize = 5;

/// A cell on the board, identified by 1..=25 in row-major order.
///
/// Row is `(id - 1) / 5` and column is `(id - 1) % 5`, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Cell(u8);

impl Cell {
    /// Create a cell, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCell`] if the id is outside 1..=25.
    pub fn new(id: usize) -> Result<Self> {
        if (1..=CELL_COUNT).contains(&id) {
            Ok(Cell(id as u8))
        } else {
            Err(Error::InvalidCell { cell: id })
        }
    }

    /// All 25 cells in ascending id order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (1..=CELL_COUNT as u8).map(Cell)
    }

    /// The 1-based cell id.
    pub fn id(self) -> usize {
        self.0 as usize
    }

    /// Zero-based row.
    pub fn row(self) -> usize {
        self.index() / GRID_SIDE
    }

    /// Zero-based column.
    pub fn col(self) -> usize {
        self.index() % GRID_SIDE
    }

    /// Zero-based index into per-cell tables.
    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub(crate) fn from_index(index: usize) -> Cell {
        debug_assert!(index < CELL_COUNT, "cell index {index} out of range");
        Cell(index as u8 + 1)
    }
}

impl TryFrom<usize> for Cell {
    type Error = Error;

    fn try_from(id: usize) -> Result<Self> {
        Cell::new(id)
    }
}

impl From<Cell> for usize {
    fn from(cell: Cell) -> Self {
        cell.id()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Cell::new(0).is_err());
        assert!(Cell::new(1).is_ok());
        assert!(Cell::new(25).is_ok());
        assert!(matches!(
            Cell::new(26),
            Err(Error::InvalidCell { cell: 26 })
        ));
    }

    #[test]
    fn test_row_col() {
        let first = Cell::new(1).unwrap();
        assert_eq!((first.row(), first.col()), (0, 0));

        let seventh = Cell::new(7).unwrap();
        assert_eq!((seventh.row(), seventh.col()), (1, 1));

        let last = Cell::new(25).unwrap();
        assert_eq!((last.row(), last.col()), (4, 4));
    }

    #[test]
    fn test_all_covers_board() {
        let cells: Vec<usize> = Cell::all().map(Cell::id).collect();
        assert_eq!(cells.len(), CELL_COUNT);
        assert_eq!(cells.first(), Some(&1));
        assert_eq!(cells.last(), Some(&25));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let ok: Cell = serde_json::from_str("13").unwrap();
        assert_eq!(ok.id(), 13);
        assert!(serde_json::from_str::<Cell>("30").is_err());
    }
}
