//! # tally-cli
//!
//! Command-line interface for the tally reconciliation pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tally_recon::{prepare_run, run, ReconConfig, SheetSelector};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// tally - reconcile aisle workbook sales against a POS export
#[derive(Parser)]
#[command(name = "tally")]
#[command(
    author,
    version,
    about = "Merge aisle workbook sheets with a POS import CSV by item id",
    long_about = None
)]
struct Cli {
    /// Path to the Excel workbook (with aisle sheets)
    #[arg(short = 'e', long = "excel-file", value_name = "FILE")]
    excel_file: PathBuf,

    /// Path to the POS import CSV (item ids and totals)
    #[arg(short = 'i', long = "import-csv", value_name = "FILE")]
    import_csv: PathBuf,

    /// Output folder for the updated workbook and the report
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: PathBuf,

    /// Process every sheet whose name starts with "aisle" instead of
    /// just "Aisle 1"
    #[arg(long)]
    prefix: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = ReconConfig::default();
    if cli.prefix {
        config.selector = SheetSelector::Prefix("aisle".to_string());
    }

    // Fail on missing inputs before touching anything, then take the
    // recovery copy.
    prepare_run(&cli.excel_file, &cli.import_csv)
        .context("Failed to validate inputs and back up workbook")?;

    let summary = run(&cli.excel_file, &cli.import_csv, &cli.output_dir, &config)
        .context("reconciliation run failed")?;

    info!(
        fact_rows = summary.fact_rows,
        ledger_entries = summary.ledger_entries,
        collapsed_duplicates = summary.collapsed_duplicates,
        matched = summary.matched,
        unmatched = summary.unmatched,
        duplicate_ids = summary.duplicate_ids,
        "run complete"
    );
    println!("Updated workbook: {}", summary.outputs.workbook.display());
    println!("Report: {}", summary.outputs.report.display());

    Ok(())
}
