use anyhow::Result;
use clap::Parser;
use colored::*;
use javagraph::dataset::{import_dataset, resolve_default_input, ImportConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dataset_importer", version, about = "Turn a code-smell JSON dataset into wrapped Java snippet files")]
struct Cli {
    /// Dataset JSON file (defaults to the normalized export when present)
    #[arg(long, value_name = "file")]
    input: Option<PathBuf>,

    /// Output directory for wrapped .java snippet files
    #[arg(long, value_name = "dir", default_value = "graphs/json/java")]
    java_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = ImportConfig {
        input: cli.input.unwrap_or_else(resolve_default_input),
        java_dir: cli.java_dir,
    };
    let summary = import_dataset(&cfg)?;

    println!(
        "{}",
        format!("Snippet files written: {}", summary.written).green()
    );
    Ok(())
}
