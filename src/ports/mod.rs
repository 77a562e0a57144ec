//! Ports (trait boundaries) for external dependencies.
//!
//! The engine owns these interfaces; adapters in [`crate::adapters`] and
//! [`crate::pipeline`] implement them. Randomness is a port so tests can force
//! EXPLORE/EXPLOIT branches and tie-breaks deterministically.

pub mod history;
pub mod observer;
pub mod random;

pub use history::HistorySource;
pub use observer::Observer;
pub use random::RandomSource;
