//! Command line entry point for the waitlist engine
//!
//! Reads a restaurant snapshot from a JSON file, runs one engine operation
//! against it and prints the result as JSON on stdout. Logs go to stderr.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use waitlist_engine::config::AppConfig;
use waitlist_engine::metrics::MetricsCollector;
use waitlist_engine::utils::FixedClock;
use waitlist_engine::{RestaurantSnapshot, WaitlistEngine};

/// Waitlist Engine - wait estimates, table matching and turnover audits
#[derive(Parser)]
#[command(
    name = "waitlist-engine",
    version,
    about = "Capacity and table matching engine for restaurant waitlists",
    long_about = "Waitlist Engine estimates how long a party will wait, picks the table \
                 category it should be seated at, and compares configured table turnover \
                 with the turnover observed in past seatings. It reads a JSON restaurant \
                 snapshot and prints JSON results."
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Pin the current time
    #[arg(
        long,
        global = true,
        value_name = "RFC3339",
        value_parser = parse_timestamp,
        help = "Evaluate as of this instant instead of the system clock"
    )]
    now: Option<DateTime<Utc>>,

    /// Print metrics after the result
    #[arg(long, global = true, help = "Print Prometheus metrics to stderr after the result")]
    metrics: bool,

    /// Dry run mode (validate config and snapshot and exit)
    #[arg(
        long,
        global = true,
        help = "Validate configuration and snapshot and exit without running"
    )]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate the wait for a party
    Estimate(PartyArgs),
    /// Pick the table category for a party
    Match(PartyArgs),
    /// Match and estimate together
    Quote(PartyArgs),
    /// Show the wait for every active table category
    Board(SnapshotArgs),
    /// Compare configured turnover with seating history
    Analyze(SnapshotArgs),
}

#[derive(ClapArgs)]
struct SnapshotArgs {
    /// Restaurant snapshot (JSON)
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,
}

#[derive(ClapArgs)]
struct PartyArgs {
    #[command(flatten)]
    source: SnapshotArgs,

    /// Number of guests in the party
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    party_size: u32,

    /// Preferred table category name
    #[arg(long, value_name = "CATEGORY")]
    prefer: Option<String>,
}

impl Command {
    fn snapshot_path(&self) -> &PathBuf {
        match self {
            Command::Estimate(args) | Command::Match(args) | Command::Quote(args) => {
                &args.source.snapshot
            }
            Command::Board(args) | Command::Analyze(args) => &args.snapshot,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Estimate(_) => "estimate",
            Command::Match(_) => "match",
            Command::Quote(_) => "quote",
            Command::Board(_) => "board",
            Command::Analyze(_) => "analyze",
        }
    }
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", raw, e))
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup banner with engine settings
fn display_startup_banner(config: &AppConfig) {
    info!("Waitlist Engine v{}", waitlist_engine::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   No-capacity quote: {}m",
        config.estimator.no_capacity_minutes
    );
    info!(
        "   Default turnover: {}m",
        config.matching.default_turnover_minutes
    );
    info!(
        "   Turnover adjustment threshold: {}%",
        config.turnover.adjustment_threshold_percent
    );
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    waitlist_engine::config::validate_config(&config)?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: &Args, engine: &WaitlistEngine, snapshot: &RestaurantSnapshot) -> Result<()> {
    match &args.command {
        Command::Estimate(party) => print_json(&engine.estimate(snapshot, party.party_size)?),
        Command::Match(party) => {
            let table_match =
                engine.find_table(snapshot, party.party_size, party.prefer.as_deref());
            if table_match.is_none() {
                warn!("No active table categories in snapshot");
            }
            print_json(&table_match)
        }
        Command::Quote(party) => {
            print_json(&engine.quote(snapshot, party.party_size, party.prefer.as_deref())?)
        }
        Command::Board(_) => print_json(&engine.category_waits(snapshot)),
        Command::Analyze(_) => print_json(&engine.analyze(snapshot)),
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    let snapshot_path = args.command.snapshot_path();
    let snapshot = match RestaurantSnapshot::from_file(snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    if args.dry_run {
        info!("Configuration and snapshot validation successful");
        info!("Dry run completed - exiting without running {}", args.command.name());
        return Ok(());
    }

    let mut engine = WaitlistEngine::from_config(&config)?;
    if let Some(now) = args.now {
        info!("Evaluating as of {}", now.to_rfc3339());
        engine = engine.with_clock(Arc::new(FixedClock(now)));
    }

    let metrics = if args.metrics {
        let collector = Arc::new(MetricsCollector::new()?);
        engine = engine.with_metrics(collector.clone());
        Some(collector)
    } else {
        None
    };

    info!("Running {} against {}", args.command.name(), snapshot_path.display());
    run(&args, &engine, &snapshot)?;

    if let Some(metrics) = metrics {
        eprint!("{}", metrics.render()?);
    }

    Ok(())
}
