mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::sync::SyncArgs;
use commands::trade::TradeArgs;

/// Equity trade profit/loss calculator
#[derive(Parser)]
#[command(
    name = "tcalc",
    version,
    about = "Equity trade profit/loss, margin trading and stop-loss calculations",
    long_about = "A CLI for sizing up a single equity trade with decimal precision. \
                  Computes baseline profit/loss, leveraged (MTF) returns net of \
                  borrowing interest with a break-even price, and the impact of \
                  a stop-loss."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level written to stderr: trace, debug, info, warn, error
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a trade: baseline P&L, optional MTF leverage and stop-loss
    Analyze(TradeArgs),
    /// Check trade inputs and report every invalid field
    Validate(TradeArgs),
    /// Convert a target price to a percent change from the buy price, or back
    Sync(SyncArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(level: &str) {
    let max_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}: failed to install logger: {}", "warning".yellow().bold(), e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::trade::run_analyze(args),
        Commands::Validate(args) => commands::trade::run_validate(args),
        Commands::Sync(args) => commands::sync::run_sync(args),
        Commands::Version => {
            println!("tcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
