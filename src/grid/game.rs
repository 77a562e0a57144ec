//! Historical game records fed to the engine by the persistence layer

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::error::{Error, Result};

/// A completed game as stored by the outer application.
///
/// Field names follow the stored JSON (`revealedCellsInOrder`,
/// `bonesPositions`); snake_case spellings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    #[serde(alias = "revealed_cells_in_order", alias = "revealed")]
    pub revealed_cells_in_order: Vec<usize>,
    #[serde(alias = "bones_positions", alias = "bones")]
    pub bones_positions: Vec<usize>,
}

impl GameRecord {
    pub fn new(revealed_cells_in_order: Vec<usize>, bones_positions: Vec<usize>) -> Self {
        Self {
            revealed_cells_in_order,
            bones_positions,
        }
    }

    /// Validate ids and convert into a [`HistoricalGame`].
    ///
    /// `index` is the record's position in its source and only feeds the error.
    pub fn validate(&self, index: usize) -> Result<HistoricalGame> {
        let convert = |field: &str, ids: &[usize]| -> Result<Vec<Cell>> {
            ids.iter()
                .map(|&id| {
                    Cell::new(id).map_err(|_| Error::InvalidGameRecord {
                        index,
                        reason: format!("{field} contains id {id} outside 1-25"),
                    })
                })
                .collect()
        };

        Ok(HistoricalGame {
            revealed: convert("revealedCellsInOrder", &self.revealed_cells_in_order)?,
            bones: convert("bonesPositions", &self.bones_positions)?,
        })
    }
}

/// A validated historical game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalGame {
    revealed: Vec<Cell>,
    bones: Vec<Cell>,
}

impl HistoricalGame {
    pub fn new(revealed: Vec<Cell>, bones: Vec<Cell>) -> Self {
        Self { revealed, bones }
    }

    /// Cells revealed during the game, in reveal order.
    pub fn revealed(&self) -> &[Cell] {
        &self.revealed
    }

    pub fn bones(&self) -> &[Cell] {
        &self.bones
    }

    pub fn is_bone(&self, cell: Cell) -> bool {
        self.bones.contains(&cell)
    }

    /// The opening reveal, if the game revealed anything.
    pub fn first_cell(&self) -> Option<Cell> {
        self.revealed.first().copied()
    }

    /// Whether the opening reveal was a chicken. `None` if nothing was revealed.
    pub fn first_cell_was_safe(&self) -> Option<bool> {
        self.first_cell().map(|cell| !self.is_bone(cell))
    }

    /// A game is an overall success when none of its reveals hit a bone.
    pub fn was_success(&self) -> bool {
        !self.revealed.is_empty() && self.revealed.iter().all(|&cell| !self.is_bone(cell))
    }
}

/// Validate a batch of records, failing on the first bad one.
pub fn validate_records(records: &[GameRecord]) -> Result<Vec<HistoricalGame>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}
