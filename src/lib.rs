//! Adaptive cell advisor for the 5x5 chickens-and-bones reveal game
//!
//! This crate provides:
//! - A 25-cell grid model with configurable upper/lower zones and preferred cells
//! - An epsilon-greedy selection policy with zone rotation and anti-repetition
//! - A Q-learning-style value update with multiplicative epsilon decay
//! - Seeding from historical games and read-only diagnostics
//! - A thread-safe [`app::Advisor`] service and a backtest pipeline
//!
//! ## Example
//!
//! ```
//! use chicken_advisor::{Advisor, AdvisorConfig};
//!
//! let advisor = Advisor::new(AdvisorConfig::default().with_seed(7))?;
//! let pick = advisor.select_next_ids(&[])?;
//! advisor.update(pick.cell, true, 1.0)?;
//! assert!(advisor.diagnostics()?.epsilon < 0.30);
//! # Ok::<(), chicken_advisor::Error>(())
//! ```

pub mod adapters;
pub mod app;
pub mod cli;
pub mod engine;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod ports;

pub use app::{Advisor, AdvisorConfig};
pub use engine::{DiagnosticsSnapshot, SelectionResult, StateStore, Strategy};
pub use error::{Error, Result};
pub use grid::{Cell, GameRecord, HistoricalGame, Zone};
