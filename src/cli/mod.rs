//! CLI infrastructure for the advisor
//!
//! This module provides the command-line interface for suggesting cells,
//! backtesting against recorded games, and inspecting learned state.

pub mod commands;
pub mod config;
pub mod output;
