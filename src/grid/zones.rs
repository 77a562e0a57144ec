//! Zone partition and preferred-cell tables used for zone rotation
//!
//! The board is split into two disjoint zones. Each zone carries a curated
//! subset of "preferred" cells, which are the only candidates the policy
//! considers before its fallback tiers widen the pool. Both the partition and
//! the preferred subsets are static configuration, never learned.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use super::cell::{CELL_COUNT, Cell};
use crate::error::{Error, Result};

/// One of the two halves of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Upper,
    Lower,
}

impl Zone {
    /// The other zone.
    pub fn opposite(self) -> Zone {
        match self {
            Zone::Upper => Zone::Lower,
            Zone::Lower => Zone::Upper,
        }
    }

    pub fn both() -> [Zone; 2] {
        [Zone::Upper, Zone::Lower]
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Upper => "upper",
            Zone::Lower => "lower",
        };
        f.pad(name)
    }
}

/// Raw zone tables as written in configuration (plain cell ids).
///
/// Convert with [`ZoneLayout::from_spec`], which validates the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub upper: Vec<usize>,
    pub lower: Vec<usize>,
    pub preferred_upper: Vec<usize>,
    pub preferred_lower: Vec<usize>,
}

impl Default for ZoneSpec {
    fn default() -> Self {
        Self {
            upper: (1..=12).collect(),
            lower: (13..=25).collect(),
            preferred_upper: vec![1, 3, 5, 7, 9, 11],
            preferred_lower: vec![15, 17, 19, 21, 23, 25],
        }
    }
}

/// Validated zone partition with its preferred subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneLayout {
    zone_of: [Zone; CELL_COUNT],
    preferred_upper: Vec<Cell>,
    preferred_lower: Vec<Cell>,
}

impl ZoneLayout {
    /// Build a layout from raw tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if an id is outside 1..=25, the
    /// zones overlap or do not cover the board, a preferred cell lies outside
    /// its zone, or a preferred set is empty.
    pub fn from_spec(spec: &ZoneSpec) -> Result<Self> {
        let upper = to_cells("upper", &spec.upper)?;
        let lower = to_cells("lower", &spec.lower)?;

        let mut zone_of: [Option<Zone>; CELL_COUNT] = [None; CELL_COUNT];
        for (zone, cells) in [(Zone::Upper, &upper), (Zone::Lower, &lower)] {
            for &cell in cells {
                if let Some(existing) = zone_of[cell.index()] {
                    return Err(Error::config(format!(
                        "cell {cell} is listed in zone '{zone}' but already belongs to zone '{existing}'"
                    )));
                }
                zone_of[cell.index()] = Some(zone);
            }
        }

        let mut resolved = [Zone::Upper; CELL_COUNT];
        for (index, slot) in zone_of.iter().enumerate() {
            match slot {
                Some(zone) => resolved[index] = *zone,
                None => {
                    return Err(Error::config(format!(
                        "cell {} is not assigned to any zone",
                        Cell::from_index(index)
                    )));
                }
            }
        }

        let preferred_upper = to_cells("preferred_upper", &spec.preferred_upper)?;
        let preferred_lower = to_cells("preferred_lower", &spec.preferred_lower)?;
        for (zone, preferred) in [
            (Zone::Upper, &preferred_upper),
            (Zone::Lower, &preferred_lower),
        ] {
            if preferred.is_empty() {
                return Err(Error::config(format!(
                    "preferred set for zone '{zone}' is empty"
                )));
            }
            if let Some(stray) = preferred.iter().find(|c| resolved[c.index()] != zone) {
                return Err(Error::config(format!(
                    "preferred cell {stray} does not belong to zone '{zone}'"
                )));
            }
        }

        Ok(Self {
            zone_of: resolved,
            preferred_upper,
            preferred_lower,
        })
    }

    /// Zone a cell belongs to.
    pub fn zone_of(&self, cell: Cell) -> Zone {
        self.zone_of[cell.index()]
    }

    /// Preferred cells of a zone, in configured order.
    pub fn preferred(&self, zone: Zone) -> &[Cell] {
        match zone {
            Zone::Upper => &self.preferred_upper,
            Zone::Lower => &self.preferred_lower,
        }
    }

    /// Preferred cells of both zones (upper first).
    pub fn all_preferred(&self) -> impl Iterator<Item = Cell> + '_ {
        self.preferred_upper
            .iter()
            .chain(self.preferred_lower.iter())
            .copied()
    }

    /// All cells of a zone in ascending order.
    pub fn cells_in(&self, zone: Zone) -> impl Iterator<Item = Cell> + '_ {
        Cell::all().filter(move |&cell| self.zone_of(cell) == zone)
    }
}

fn to_cells(table: &str, ids: &[usize]) -> Result<Vec<Cell>> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|&id| {
            let cell = Cell::new(id).map_err(|_| {
                Error::config(format!("{table} table contains id {id} outside 1-25"))
            })?;
            if !seen.insert(cell) {
                return Err(Error::config(format!(
                    "{table} table lists cell {cell} more than once"
                )));
            }
            Ok(cell)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(id: usize) -> Cell {
        Cell::new(id).unwrap()
    }

    #[test]
    fn test_default_layout_partitions_board() {
        let layout = ZoneLayout::from_spec(&ZoneSpec::default()).unwrap();
        assert_eq!(layout.cells_in(Zone::Upper).count(), 12);
        assert_eq!(layout.cells_in(Zone::Lower).count(), 13);
        assert_eq!(layout.zone_of(cell(12)), Zone::Upper);
        assert_eq!(layout.zone_of(cell(13)), Zone::Lower);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Zone::Upper.opposite(), Zone::Lower);
        assert_eq!(Zone::Lower.opposite().opposite(), Zone::Lower);
    }

    #[test]
    fn test_overlapping_zones_rejected() {
        let spec = ZoneSpec {
            upper: (1..=13).collect(),
            ..ZoneSpec::default()
        };
        let err = ZoneLayout::from_spec(&spec).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("cell 13"));
    }

    #[test]
    fn test_uncovered_cell_rejected() {
        let spec = ZoneSpec {
            lower: (13..=24).collect(),
            preferred_lower: vec![15, 17],
            ..ZoneSpec::default()
        };
        let err = ZoneLayout::from_spec(&spec).unwrap_err();
        assert!(err.to_string().contains("cell 25 is not assigned"));
    }

    #[test]
    fn test_out_of_range_id_is_configuration_error() {
        let spec = ZoneSpec {
            preferred_lower: vec![15, 26],
            ..ZoneSpec::default()
        };
        assert!(matches!(
            ZoneLayout::from_spec(&spec),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_preferred_outside_zone_rejected() {
        let spec = ZoneSpec {
            preferred_upper: vec![1, 14],
            ..ZoneSpec::default()
        };
        let err = ZoneLayout::from_spec(&spec).unwrap_err();
        assert!(err.to_string().contains("preferred cell 14"));
    }

    #[test]
    fn test_empty_preferred_rejected() {
        let spec = ZoneSpec {
            preferred_upper: vec![],
            ..ZoneSpec::default()
        };
        assert!(ZoneLayout::from_spec(&spec).is_err());
    }
}
