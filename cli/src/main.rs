//! sbw-cli
//!
//! Command-line front end over `sbw-core`: reads a log file, runs the
//! decode pipeline, and exports the records as CSV and JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sbw_core::{Pipeline, StaticKey};

mod config;
mod export;

#[derive(Parser)]
#[command(name = "sbw-cli", about = "Decode, decrypt, and export SBW log files", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode an SBW log file
    Decode(DecodeArgs),
}

#[derive(Args)]
struct DecodeArgs {
    /// Path to the SBW log file (.sbw)
    input: PathBuf,

    /// Output directory for decoded data
    #[arg(long, short = 'o')]
    out: PathBuf,

    /// Export per-type CSV files
    #[arg(long)]
    csv: bool,

    /// Export a complete JSON dump
    #[arg(long)]
    json: bool,

    /// Spread per-block work over worker threads
    #[arg(long)]
    parallel: bool,

    /// Decryption key as 64 hex characters (falls back to the config file,
    /// then to the all-zero development key)
    #[arg(long)]
    key_hex: Option<String>,

    /// Path to a JSON configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Decode(args) => {
            init_logging(args.verbose);
            match run_decode(&args) {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(err) => {
                    eprintln!("error: {err:#}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Returns whether the decode succeeded overall (at least one record).
fn run_decode(args: &DecodeArgs) -> Result<bool> {
    let file_config = config::FileConfig::load(args.config.as_deref())?;
    let key = config::resolve_key(args.key_hex.as_deref(), &file_config)?;

    let raw = fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if raw.is_empty() {
        bail!("input file is empty: {}", args.input.display());
    }
    info!(input = %args.input.display(), bytes = raw.len(), "starting decode");

    let pipeline = Pipeline::new(file_config.decoder, StaticKey::new(key))?;
    let report = if args.parallel {
        pipeline.decode_parallel(&raw, None)
    } else {
        pipeline.decode(&raw)
    };

    for issue in &report.errors {
        warn!("{issue}");
    }
    for issue in &report.warnings {
        warn!("{issue}");
    }

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let mut files_created = 0usize;
    if args.csv {
        files_created += export::write_csv(&report.records, &args.out)?;
    }
    if args.json {
        files_created += export::write_json(&report, &args.out)?;
    }

    info!(
        blocks_seen = report.blocks_seen,
        blocks_processed = report.blocks_processed,
        records = report.records.len(),
        files_created,
        "decode operation completed"
    );
    Ok(report.success())
}
