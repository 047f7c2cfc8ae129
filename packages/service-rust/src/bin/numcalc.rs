//! Command-line host for the calculator.
//!
//! Takes the same primitives a web form would submit (the number text and
//! the selected operation identifiers) and prints the report.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;

use numcalc_core::DEFAULT_MAX_NUMBER;
use numcalc_service::logging::init_tracing;
use numcalc_service::{CalculationReport, Calculator, ServiceConfig};

#[derive(Parser)]
#[command(
    name = "numcalc",
    about = "Run factorial, palindrome, fibonacci, prime and cube-root checks on a number"
)]
struct Cli {
    /// The number to operate on.
    #[arg(allow_negative_numbers = true)]
    number: Option<String>,

    /// Operation identifiers (repeatable or comma-separated).
    #[arg(short, long = "operation", value_delimiter = ',')]
    operations: Vec<String>,

    /// Output format.
    #[arg(long, env = "NUMCALC_FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Largest accepted number (at least 1).
    #[arg(
        long,
        env = "NUMCALC_MAX_NUMBER",
        default_value_t = DEFAULT_MAX_NUMBER,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    max_number: i64,

    /// Per-operation timeout in milliseconds.
    #[arg(long, env = "NUMCALC_TIMEOUT_MS", default_value_t = 30_000)]
    timeout_ms: u64,

    /// Maximum concurrently running operations.
    #[arg(long, env = "NUMCALC_MAX_CONCURRENT", default_value_t = 1000)]
    max_concurrent: u32,

    /// Emit logs as JSON.
    #[arg(long, env = "NUMCALC_LOG_JSON")]
    log_json: bool,

    /// List the known operation identifiers and exit.
    #[arg(long)]
    list: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<&Cli> for ServiceConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            max_number: cli.max_number,
            default_operation_timeout_ms: cli.timeout_ms,
            max_concurrent_operations: cli.max_concurrent,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json)?;

    let calculator = Calculator::new(ServiceConfig::from(&cli));
    let mut stdout = std::io::stdout().lock();

    if cli.list {
        for id in calculator.known_operation_ids() {
            writeln!(stdout, "{id}")?;
        }
        return Ok(());
    }

    let report = match calculator
        .calculate(cli.number.as_deref(), cli.operations.as_slice())
        .await
    {
        Ok(report) => report,
        Err(reason) => {
            eprintln!("Error: {reason}");
            process::exit(2);
        }
    };

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("serializing report")?;
            writeln!(stdout, "{json}")?;
        }
        OutputFormat::Text => write_text(&mut stdout, &report)?,
    }
    Ok(())
}

fn write_text(out: &mut impl Write, report: &CalculationReport) -> std::io::Result<()> {
    writeln!(out, "Results for {}", report.number)?;
    for result in &report.results {
        writeln!(out, "  {}: {}", result.label, result.message)?;
    }
    Ok(())
}
