use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Decode an event file and print the structural model as JSON.
#[derive(Parser)]
struct Args {
    /// Event file to dump
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let store = scorebook::read_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    println!("{}", serde_json::to_string_pretty(store.games())?);
    Ok(())
}
