//! Suggest command - Recommend the next cell to reveal

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{
    config::{CommonArgs, seeded_advisor},
    output::print_selection,
};

#[derive(Parser, Debug)]
#[command(about = "Suggest the next cell to reveal")]
pub struct SuggestArgs {
    /// History file (JSON array of game records) to seed from
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Cells already revealed in the current game, comma separated
    #[arg(long, short = 'r', value_delimiter = ',')]
    pub revealed: Vec<usize>,

    /// Print the selection as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: SuggestArgs) -> Result<()> {
    let advisor = seeded_advisor(&args.common, args.history.as_deref())?;
    let selection = advisor
        .select_next_ids(&args.revealed)
        .context("Failed to select a cell")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&selection)?);
    } else {
        print_selection(&selection);
    }
    Ok(())
}
