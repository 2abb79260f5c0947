//! Compare the titles of two literature search exports.
//!
//! ```text
//! bibcompare original.xml rerun.csv --operation b-minus-a --output new_titles
//! ```

use bibcompare::loader::load_pair;
use bibcompare::{ComparisonSummary, Operation, Record, SetComparison, order_records, save_csv};
use clap::Parser;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "bibcompare",
    version,
    about = "Compare the titles of two CSV or EndNote XML exports",
    long_about = "Compare the titles of two literature search exports (CSV or EndNote XML). \
        Titles are matched after normalization, so case, accents, HTML entities, inline tags \
        and punctuation do not hide a match.",
    after_help = "Set RUST_LOG to control diagnostics, e.g. RUST_LOG=info. Duplicate titles \
        are reported as warnings."
)]
struct Cli {
    /// Original search export (A)
    #[arg(value_name = "A")]
    a: PathBuf,
    /// New search export (B)
    #[arg(value_name = "B")]
    b: PathBuf,
    #[arg(
        long,
        default_value = "b-minus-a",
        value_name = "OPERATION",
        help = "Set operation to output: b-minus-a, a-minus-b, union, symmetric-difference, \
            intersection (or B-A, A-B, AUB, A^B, A⋂B)"
    )]
    operation: Operation,
    #[arg(long, short, value_name = "PATH", help = "Save the result set as CSV")]
    output: Option<PathBuf>,
    #[arg(long, short, help = "Print the summary only")]
    quiet: bool,
    #[arg(long, conflicts_with = "quiet", help = "Print the report as JSON")]
    json: bool,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    operation: &'static str,
    summary: ComparisonSummary,
    results: Vec<&'a Record>,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let (a, b) = load_pair(&cli.a, &cli.b)?;
    let comparison = SetComparison::new(&a, &b);
    let summary = comparison.summary();
    let results = order_records(comparison.get(cli.operation));

    if cli.json {
        let report = JsonReport {
            operation: cli.operation.name(),
            summary,
            results: results.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{summary}");
        if !cli.quiet {
            println!();
            println!("{} ({} titles):", cli.operation, results.len());
            for record in &results {
                println!("{}", record.title());
            }
        }
    }

    if let Some(output) = &cli.output {
        let count = results.len();
        let written = save_csv(output, results)?;
        eprintln!("Saved {count} titles to {}", written.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
