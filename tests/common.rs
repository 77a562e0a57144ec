//! Common test utilities for the advisor test suite.
//!
//! Random game generation and history-file helpers shared across tests.

#![allow(dead_code)]

use std::io::Write;

use chicken_advisor::grid::{CELL_COUNT, GameRecord, HistoricalGame, validate_records};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tempfile::NamedTempFile;

/// Generate a random game: `bones` distinct bone cells and up to `max_reveals`
/// reveals that stop at the first bone hit.
pub fn random_record(rng: &mut StdRng, bones: usize, max_reveals: usize) -> GameRecord {
    let mut ids: Vec<usize> = (1..=CELL_COUNT).collect();
    ids.shuffle(rng);
    let bones_positions = ids[..bones].to_vec();

    let mut reveal_order: Vec<usize> = (1..=CELL_COUNT).collect();
    reveal_order.shuffle(rng);
    let wanted = rng.random_range(0..=max_reveals);

    let mut revealed = Vec::with_capacity(wanted);
    for id in reveal_order.into_iter().take(wanted) {
        revealed.push(id);
        if bones_positions.contains(&id) {
            break;
        }
    }

    GameRecord::new(revealed, bones_positions)
}

/// A deterministic batch of random records.
pub fn random_records(seed: u64, count: usize) -> Vec<GameRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let bones = rng.random_range(1..=8);
            random_record(&mut rng, bones, 6)
        })
        .collect()
}

pub fn random_games(seed: u64, count: usize) -> Vec<HistoricalGame> {
    validate_records(&random_records(seed, count)).expect("generated records are valid")
}

pub fn game(revealed: &[usize], bones: &[usize]) -> HistoricalGame {
    GameRecord::new(revealed.to_vec(), bones.to_vec())
        .validate(0)
        .expect("test game is valid")
}

/// Write records as a JSON history file.
pub fn history_file(records: &[GameRecord]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    serde_json::to_writer(&mut file, records).expect("write history");
    file.flush().expect("flush history");
    file
}
