//! The 5×5 board: cells, the two rotation zones, and historical game records

pub mod cell;
pub mod game;
pub mod zones;

pub use cell::{CELL_COUNT, Cell, GRID_SIDE};
pub use game::{GameRecord, HistoricalGame, validate_records};
pub use zones::{Zone, ZoneLayout, ZoneSpec};
