//! History source reading an exported JSON file.
//!
//! The file holds a JSON array of game records, oldest first:
//!
//! ```json
//! [
//!   { "revealedCellsInOrder": [3, 8], "bonesPositions": [8, 20, 21] },
//!   { "revealedCellsInOrder": [12], "bonesPositions": [1, 2, 3] }
//! ]
//! ```

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    Result,
    error::Error,
    grid::{GameRecord, HistoricalGame, validate_records},
    ports::HistorySource,
};

/// JSON file containing an array of [`GameRecord`]s.
#[derive(Debug, Clone)]
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read raw records without validating cell ids.
    pub fn read_records(&self) -> Result<Vec<GameRecord>> {
        let file = File::open(&self.path).map_err(|source| Error::Io {
            operation: format!("open history file {}", self.path.display()),
            source,
        })?;
        let records: Vec<GameRecord> = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            "Read {} game records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

impl HistorySource for JsonHistoryFile {
    fn load_games(&self) -> Result<Vec<HistoricalGame>> {
        validate_records(&self.read_records()?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_reads_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"revealedCellsInOrder":[3,8],"bonesPositions":[8,20]}},{{"revealedCellsInOrder":[12],"bonesPositions":[1]}}]"#
        )
        .unwrap();

        let games = JsonHistoryFile::new(file.path()).load_games().unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].first_cell_was_safe(), Some(true));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = JsonHistoryFile::new("/nonexistent/history.json")
            .load_games()
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = JsonHistoryFile::new(file.path()).load_games().unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
