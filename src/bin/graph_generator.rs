use anyhow::Result;
use clap::Parser;
use colored::*;
use javagraph::pipeline::{generate_dir, GenerateConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "graph_generator", version, about = "Wrap Java snippets and emit their AST graphs as DOT")]
struct Cli {
    /// Directory of .java snippet files
    #[arg(long, value_name = "dir", default_value = "graphs/json/java")]
    input: PathBuf,

    /// Output directory for .dot graphs
    #[arg(long, value_name = "dir", default_value = "graphs/data")]
    output: PathBuf,

    /// Directory for failure artifacts (default: <output>/errors)
    #[arg(long, value_name = "dir")]
    errors: Option<PathBuf>,

    /// Keep chain nodes instead of compacting them
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.input.exists() {
        eprintln!("Input directory does not exist: {}", cli.input.display());
        return Ok(());
    }

    let error_dir = cli
        .errors
        .clone()
        .unwrap_or_else(|| cli.output.join("errors"));
    let cfg = GenerateConfig {
        input_dir: cli.input,
        output_dir: cli.output,
        error_dir,
        verbose: cli.verbose,
    };
    let summary = generate_dir(&cfg)?;

    println!(
        "{}",
        format!("Graphs generated: {}", summary.generated).green()
    );
    if summary.failed > 0 {
        println!(
            "{}",
            format!("Fragments skipped: {}", summary.failed).yellow()
        );
    }
    Ok(())
}
