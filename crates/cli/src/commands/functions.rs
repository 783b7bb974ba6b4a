//! Debug helper that lists discovered function units without verification.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;

use nullaudit_scanners::{
    find_attribute_accesses, find_sentinel_assignments, SourceTree,
};

#[derive(Args)]
pub struct FunctionsArgs {
    /// Python file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Also show the extracted events per function
    #[arg(short, long)]
    pub events: bool,
}

pub fn execute(args: FunctionsArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let tree = SourceTree::parse(&bytes)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    let units = tree.functions();
    println!(
        "{} {} function(s) in {}",
        "🔧".cyan(),
        units.len(),
        args.file.display()
    );

    for unit in &units {
        println!(
            "  {} (lines {}-{})",
            unit.name.bright_yellow(),
            unit.start_line,
            unit.end_line
        );

        if args.events {
            for event in find_sentinel_assignments(unit, tree.source()) {
                println!("    🔹 {} = None (line {})", event.variable, event.line);
            }
            for event in find_attribute_accesses(unit, tree.source()) {
                println!("    🔸 {}.<member> (line {})", event.variable, event.line);
            }
        }
    }

    Ok(())
}
