//! Offline loader for the reference tables.
//!
//! ```text
//! csv-loader data.db zip_county.csv county_health_rankings.csv
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use county_health_api::ingest::load_csv;

#[derive(Parser)]
#[command(name = "csv-loader")]
#[command(about = "Load header-bearing CSV files into SQLite tables (one table per file)", long_about = None)]
struct Cli {
    /// SQLite database file, created if missing.
    database: PathBuf,

    /// CSV files; each becomes (or appends to) the table named after its stem.
    #[arg(required = true)]
    csv_files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    for csv in &cli.csv_files {
        let summary = load_csv(&cli.database, csv)?;
        println!(
            "Loaded {} into {} (table: {}, {} rows)",
            csv.display(),
            cli.database.display(),
            summary.table,
            summary.rows
        );
    }

    Ok(())
}
