//! Pair market maker - Entry Point
//!
//! Replays host events from a JSON-lines file (or stdin) through the
//! trader and writes its commands to stdout.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pairmm_telemetry::Metrics;
use tracing::info;

/// ETF/future market making and arbitrage agent
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PAIRMM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Host events, one JSON object per line. Reads stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print Prometheus metrics to stderr at the end of the session
    #[arg(long)]
    metrics: bool,

    /// Print the session summary as JSON to stderr
    #[arg(long)]
    summary_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    pairmm_telemetry::init_logging()?;

    info!("Starting pairmm-bot v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > PAIRMM_CONFIG env var > default.
    // An explicit path must exist; only the default may be absent.
    let explicit = args
        .config
        .or_else(|| std::env::var("PAIRMM_CONFIG").ok());

    info!(
        config_path = explicit.as_deref().unwrap_or(pairmm_bot::DEFAULT_CONFIG_PATH),
        "Loading configuration"
    );

    let config = pairmm_bot::AppConfig::load(explicit.as_deref())?;
    config.validate()?;
    info!(
        lot_size = config.limits.lot_size,
        position_limit = config.limits.position_limit,
        arbitrage_limit = config.limits.arbitrage_limit,
        max_messages = config.throttle.max_messages,
        "Configuration loaded"
    );

    let (stats, _stdout) =
        pairmm_bot::run_replay(config, args.input, std::io::stdout()).await?;
    stats.report();

    if args.summary_json {
        eprintln!("{}", stats.to_json()?);
    }
    if args.metrics {
        eprint!("{}", Metrics::gather_text()?);
    }

    Ok(())
}
