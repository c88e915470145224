use std::io::{self, Write};
use std::path::{Path, PathBuf};

use aerolog_core::config::{IngestConfig, ResampleMode};
use aerolog_core::telemetry::{parse_csv_path, write_csv_file, IngestError, IntervalStats};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cycling telemetry normalization CLI", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a CSV export and print its summary as JSON
    Ingest(IngestArgs),
    /// Print sample interval statistics of a CSV export as JSON
    Intervals(IntervalsArgs),
}

#[derive(Parser, Debug)]
struct IngestArgs {
    /// CSV file to ingest
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// JSON ingestion settings
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Write the normalized record to this CSV path
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Override the resampling policy from the config
    #[arg(long, value_enum)]
    resample: Option<ResampleArg>,
}

#[derive(Parser, Debug)]
struct IntervalsArgs {
    /// CSV file to inspect
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// JSON ingestion settings
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResampleArg {
    Auto,
    Always,
    Never,
}

impl From<ResampleArg> for ResampleMode {
    fn from(arg: ResampleArg) -> Self {
        match arg {
            ResampleArg::Auto => ResampleMode::Auto,
            ResampleArg::Always => ResampleMode::Always,
            ResampleArg::Never => ResampleMode::Never,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Ingest(args) => handle_ingest(args),
        Command::Intervals(args) => handle_intervals(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<IngestConfig> {
    match path {
        Some(path) => IngestConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(IngestConfig::default()),
    }
}

fn ingest_error(err: IngestError, input: &Path) -> anyhow::Error {
    match err.missing_columns() {
        Some(missing) => anyhow::anyhow!(
            "{} is missing required columns:\n  {}",
            input.display(),
            missing.join("\n  ")
        ),
        None => anyhow::Error::new(err).context(format!("failed to ingest {}", input.display())),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value)?;
    writeln!(handle)?;
    Ok(())
}

fn handle_ingest(args: IngestArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(mode) = args.resample {
        config.resample = mode.into();
    }

    let ingested = parse_csv_path(&args.input, &config).map_err(|e| ingest_error(e, &args.input))?;

    if let Some(output) = &args.output {
        write_csv_file(output, &ingested.record)
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!("Wrote normalized record to {}", output.display());
    }

    print_json(&ingested.summary())
}

fn handle_intervals(args: IntervalsArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    config.resample = ResampleMode::Never;

    let ingested = parse_csv_path(&args.input, &config).map_err(|e| ingest_error(e, &args.input))?;
    let stats: IntervalStats = ingested.intervals;
    print_json(&stats)
}
