mod logging;
mod report;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tax_core::calculations::FederalTaxEngine;
use tax_core::models::FilingStatus;
use tax_core::state::StateTaxDispatcher;
use tax_core::tables::TaxTables;
use tax_data::{TaxBracketLoader, load_from_file};
use tracing::{error, info};

use crate::report::{ReturnReport, SummaryRow, render_brackets, render_states, render_text};

/// Federal and state income tax calculator.
#[derive(Parser, Debug)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log filter (e.g. `debug`, `tax_core=trace`); defaults to RUST_LOG, then `info`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate every return in a CSV file
    Calculate {
        /// Path to the returns CSV
        #[arg(short, long)]
        returns: PathBuf,

        /// Bracket CSV that replaces the compiled-in schedules it covers
        #[arg(short, long)]
        brackets: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List supported states and how each taxes income
    States,
    /// Print a federal bracket schedule
    Brackets {
        #[arg(short, long)]
        year: i32,

        /// Filing status code: S, MFJ, MFS, HOH, QW
        #[arg(short, long)]
        status: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Csv,
}

fn load_tables(brackets: Option<&Path>) -> Result<TaxTables> {
    let mut tables = TaxTables::builtin().clone();

    if let Some(path) = brackets {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = TaxBracketLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        let installed = TaxBracketLoader::load(&mut tables, &records)
            .with_context(|| format!("Failed to load brackets from: {}", path.display()))?;
        info!(path = %path.display(), installed, "Bracket overrides applied");
    }

    Ok(tables)
}

fn calculate(
    returns: &Path,
    brackets: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let tables = load_tables(brackets)?;
    let records = load_from_file(returns)
        .with_context(|| format!("Failed to load returns: {}", returns.display()))?;
    info!(path = %returns.display(), count = records.len(), "Returns loaded");

    let engine = FederalTaxEngine::new(&tables);
    let dispatcher = StateTaxDispatcher::builtin();

    let mut reports = Vec::with_capacity(records.len());
    let mut failed = 0usize;
    for record in &records {
        match ReturnReport::build(record, &engine, dispatcher) {
            Ok(report) => reports.push(report),
            Err(err) => {
                failed += 1;
                error!(row = record.row, error = %err, "Return could not be calculated");
            }
        }
    }

    match format {
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", render_text(report));
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout());
            for report in &reports {
                writer
                    .serialize(SummaryRow::from(report))
                    .context("Failed to write CSV row")?;
            }
            writer.flush().context("Failed to flush CSV output")?;
        }
    }

    info!(calculated = reports.len(), failed, "Done");
    if failed > 0 {
        bail!("{failed} of {} returns could not be calculated", records.len());
    }
    Ok(())
}

fn print_brackets(
    year: i32,
    status: &str,
) -> Result<()> {
    let status =
        FilingStatus::parse(status).ok_or_else(|| anyhow!("unknown filing status: {status}"))?;
    let tables = TaxTables::builtin();
    let year_tables = tables.year(year).ok_or_else(|| {
        anyhow!(
            "unsupported tax year {year}; available: {:?}",
            tables.supported_years()
        )
    })?;

    print!(
        "{}",
        render_brackets(year, status, year_tables.bracket_table(status))
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;

    match &cli.command {
        Command::Calculate {
            returns,
            brackets,
            format,
        } => calculate(returns, brackets.as_deref(), *format),
        Command::States => {
            print!("{}", render_states(StateTaxDispatcher::builtin().rules()));
            Ok(())
        }
        Command::Brackets { year, status } => print_brackets(*year, status),
    }
}
