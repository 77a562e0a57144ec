//! Bounded memory of recent successful picks

use std::collections::VecDeque;

use crate::grid::Cell;

/// Default number of recent safe picks remembered.
pub const DEFAULT_MEMORY_CAPACITY: usize = 7;

/// Most-recent-first queue of at most `capacity` cells.
///
/// A cell counts as "blocked" only once the queue is full: early in a session
/// nothing is forbidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSafeMemory {
    cells: VecDeque<Cell>,
    capacity: usize,
}

impl RecentSafeMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() >= self.capacity
    }

    /// Prepend `cell`, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, cell: Cell) {
        self.cells.push_front(cell);
        self.cells.truncate(self.capacity);
    }

    /// True iff the memory is full and holds `cell`.
    pub fn blocks(&self, cell: Cell) -> bool {
        self.is_full() && self.cells.contains(&cell)
    }

    /// Contents, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
