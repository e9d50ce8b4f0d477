use anyhow::Result;
use clap::Parser;
use colored::*;
use javagraph::pipeline::{validate_dir, ValidateConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dir_validator", version, about = "Parse-check wrapped Java snippet files")]
struct Cli {
    /// Directory of .java snippet files
    #[arg(long, value_name = "dir", default_value = "graphs/json/java")]
    input: PathBuf,

    /// Directory for error artifacts
    #[arg(long, value_name = "dir", default_value = "graphs/json/errors")]
    errors: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.input.exists() {
        eprintln!("Input directory does not exist: {}", cli.input.display());
        return Ok(());
    }

    let cfg = ValidateConfig {
        input_dir: cli.input,
        error_dir: cli.errors,
    };
    let summary = validate_dir(&cfg)?;

    println!("{}", format!("Valid files: {}", summary.valid).green());
    if summary.invalid > 0 {
        println!("{}", format!("Invalid files: {}", summary.invalid).red());
    }
    Ok(())
}
