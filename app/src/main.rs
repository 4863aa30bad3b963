// In app/src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use backtester::Backtester;
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
mod data;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Evaluates the EMA/VWAP crossover allocation rule over bar history.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates the configured strategy once over the full bar history.
    Evaluate {
        /// Path to a JSON array of klines, oldest first.
        #[arg(short, long)]
        bars: PathBuf,
    },

    /// Replays the bar history one step at a time and reports the allocations.
    Replay {
        /// Path to a JSON array of klines, oldest first.
        #[arg(short, long)]
        bars: PathBuf,

        /// Only show the strategy the trailing N bars at each step.
        #[arg(short, long)]
        window: Option<usize>,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;

    // --- Tracing Setup ---
    let level = parse_log_level(&settings.app.log_level)?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(environment = %settings.app.environment, "Starting Atlas signal application");

    let strategy = strategies::factory::create_strategy(&settings.strategy)?;
    tracing::info!(
        strategy = strategy.name(),
        interval = %strategy.interval(),
        assets = ?strategy.assets(),
        data = ?strategy.data(),
        "Strategy created."
    );

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Evaluate { bars } => {
            let klines = data::load_klines(&bars)?;
            let allocation = strategy.assess(&klines);
            println!("{}", serde_json::to_string_pretty(&allocation)?);
        }
        Commands::Replay { bars, window } => {
            let klines = data::load_klines(&bars)?;
            let backtester = Backtester::new(strategy, window)?;
            let report = backtester.run(&klines);
            backtester::print_report(&report);
        }
    }

    tracing::info!("Atlas signal application has finished successfully.");

    Ok(())
}

/// Parses `app.log_level` (e.g., "info", "WARN").
fn parse_log_level(log_level: &str) -> Result<tracing::Level> {
    log_level
        .trim()
        .parse::<tracing::Level>()
        .map_err(|_| anyhow::anyhow!("Invalid app.log_level '{}': expected trace, debug, info, warn or error", log_level))
}
