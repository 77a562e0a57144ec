//! Diagnostics command - Show what the advisor has learned

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::{
    config::{CommonArgs, seeded_advisor},
    output::print_snapshot,
};

#[derive(Parser, Debug)]
#[command(about = "Show advisor diagnostics")]
pub struct DiagnosticsArgs {
    /// History file (JSON array of game records) to seed from
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Number of top cells to list (defaults to the configured value)
    #[arg(long, short = 'k')]
    pub top: Option<usize>,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: DiagnosticsArgs) -> Result<()> {
    let advisor = seeded_advisor(&args.common, args.history.as_deref())?;
    let snapshot = match args.top {
        Some(top) => advisor.diagnostics_top(top)?,
        None => advisor.diagnostics()?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }
    Ok(())
}
