//! CLI subcommands

pub mod backtest;
pub mod diagnostics;
pub mod suggest;
