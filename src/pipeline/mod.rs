//! Backtest pipeline abstractions
//!
//! This module provides:
//! - Replaying recorded games through the live advisor
//! - Recording observations during a replay

pub mod backtest;
pub mod observers;

pub use backtest::{Backtest, BacktestConfig, BacktestResult};
pub use observers::{
    GameObservation, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver,
    StrategyTally,
};

pub use crate::ports::Observer;
