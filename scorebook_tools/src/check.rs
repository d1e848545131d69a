use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

/// Verify that event files survive a decode/encode round trip byte for byte.
#[derive(Parser)]
struct Args {
    /// Event files to check
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let progress = ProgressBar::new(args.files.len() as u64);
    progress.set_style(ProgressStyle::with_template(
        "{msg:24} {wide_bar} {human_pos}/{human_len}",
    )?);

    let mut failures = Vec::new();
    for path in &args.files {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("?");
        progress.set_message(name.to_string());

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match scorebook::decode(&text, name) {
            Ok(store) => {
                if scorebook::encode(&store) != text {
                    failures.push(format!("{}: re-encoded bytes differ", path.display()));
                }
            }
            Err(err) => failures.push(format!("{}: {err}", path.display())),
        }
        progress.inc(1);
    }
    progress.finish();

    println!(
        "{}/{} file(s) round-trip byte-identically",
        args.files.len() - failures.len(),
        args.files.len()
    );
    if failures.is_empty() {
        Ok(())
    } else {
        for failure in &failures {
            eprintln!("{failure}");
        }
        anyhow::bail!("{} file(s) failed", failures.len())
    }
}
