//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in [`crate::ports`]:
//! random sources for the policy and history sources for seeding.

pub mod in_memory_history;
pub mod json_history;
pub mod scripted_random;
pub mod std_random;

pub use in_memory_history::InMemoryHistory;
pub use json_history::JsonHistoryFile;
pub use scripted_random::ScriptedRandom;
pub use std_random::StdRandom;
