//! Scalar cache model CLI.
//!
//! This binary drives the cache model without an interpreter. It performs:
//! 1. **Replay:** Feed a recorded load/store trace through a configured cache and report.
//! 2. **Show:** Print the geometry and an empty report for a configuration.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rvcache_core::Cache;
use rvcache_core::config::Config;
use rvcache_core::sim::trace::{self, ReplaySummary};

#[derive(Parser, Debug)]
#[command(
    name = "rvcache",
    author,
    version,
    about = "Scalar cache and write buffer model",
    long_about = "Replay a memory reference trace through a set-associative scalar cache.\n\nTrace lines are `R <addr>`, `W <addr>` or a bare `<addr>`.\n\nExamples:\n  rvcache run --trace loads.txt\n  rvcache run --trace loads.txt --config l1d.json --status-every 1000000\n  rvcache show --config l1d.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and print the cache report.
    Run {
        /// Trace file to replay.
        #[arg(short, long)]
        trace: PathBuf,

        /// JSON configuration (defaults are used when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print progress every N references (0 disables).
        #[arg(long, default_value_t = 0)]
        status_every: u64,
    },

    /// Print the geometry for a configuration.
    Show {
        /// JSON configuration (defaults are used when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            trace,
            config,
            status_every,
        } => cmd_run(&trace, config.as_deref(), status_every),
        Commands::Show { config } => cmd_show(config.as_deref()),
    };

    if let Err(message) = result {
        eprintln!("[!] FATAL: {message}");
        process::exit(1);
    }
}

/// Loads the configuration file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => Config::from_json_file(path)
            .map_err(|e| format!("could not load config '{}': {e}", path.display())),
        None => Ok(Config::default()),
    }
}

fn build_cache(path: Option<&Path>) -> Result<Cache, String> {
    let config = load_config(path)?;
    Cache::from_config(&config).map_err(|e| format!("invalid cache configuration: {e}"))
}

/// Replays a trace file and prints the summary, report and geometry.
fn cmd_run(trace_path: &Path, config: Option<&Path>, status_every: u64) -> Result<(), String> {
    let mut cache = build_cache(config)?;
    let records = trace::read_trace_file(trace_path)
        .map_err(|e| format!("'{}': {e}", trace_path.display()))?;
    info!(records = records.len(), "trace loaded");

    let summary = trace::replay(&mut cache, records, status_every, print_status);

    println!(
        "Replayed {} references: {} hits, {} misses, {} penalty cycles",
        summary.records, summary.hits, summary.misses, summary.penalty
    );
    println!();
    println!("{}", cache.report());
    println!("{}", cache.configuration_summary());
    Ok(())
}

/// Prints the geometry and the (empty) report for a configuration.
fn cmd_show(config: Option<&Path>) -> Result<(), String> {
    let cache = build_cache(config)?;
    println!("{}", cache.configuration_summary());
    println!("{}", cache.report());
    Ok(())
}

fn print_status(summary: &ReplaySummary) {
    eprintln!(
        "{} references, {} misses, {} penalty cycles",
        summary.records, summary.misses, summary.penalty
    );
}
