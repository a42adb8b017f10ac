//! almeria CLI binary.
//!
//! Provides the command-line interface for the almeria daily screener.

mod cmd;
mod data;

use std::{path::PathBuf, process};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{
    explain::ExplainArgs,
    rank::{OutputFormat, RankArgs},
};

#[derive(Parser)]
#[command(name = "almeria")]
#[command(about = "Daily cross-sectional stock screener", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available signals
    Signals {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score and rank every security in a bar file
    Rank {
        /// Long-format CSV: symbol,date,open,high,low,close,volume
        bars: PathBuf,

        /// Benchmark symbol
        #[arg(short, long)]
        benchmark: String,

        /// Separate CSV holding the benchmark series
        #[arg(long)]
        benchmark_file: Option<PathBuf>,

        /// Engine configuration (JSON)
        #[arg(long, env = "ALMERIA_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Number of top entries shown in the text report
        #[arg(short, long, default_value = "20")]
        top: usize,

        /// Number of bottom entries shown in the text report
        #[arg(long, default_value = "10")]
        bottom: usize,
    },

    /// Show the per-signal detail behind one security's score
    Explain {
        /// Long-format CSV: symbol,date,open,high,low,close,volume
        bars: PathBuf,

        /// Security to explain
        symbol: String,

        /// Benchmark symbol
        #[arg(short, long)]
        benchmark: String,

        /// Separate CSV holding the benchmark series
        #[arg(long)]
        benchmark_file: Option<PathBuf>,

        /// Engine configuration (JSON)
        #[arg(long, env = "ALMERIA_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the engine configuration as JSON
    Config {
        /// Engine configuration (JSON); the defaults when absent
        #[arg(long, env = "ALMERIA_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Signals { category, verbose } => {
            cmd::signals::list_signals(category, verbose)?;
        }
        Commands::Rank {
            bars,
            benchmark,
            benchmark_file,
            config,
            format,
            top,
            bottom,
        } => {
            cmd::rank::rank(&RankArgs {
                bars,
                benchmark,
                benchmark_file,
                config,
                format,
                top,
                bottom,
            })?;
        }
        Commands::Explain {
            bars,
            symbol,
            benchmark,
            benchmark_file,
            config,
        } => {
            cmd::explain::explain(&ExplainArgs {
                bars,
                symbol,
                benchmark,
                benchmark_file,
                config,
            })?;
        }
        Commands::Config { config } => {
            cmd::config::show_config(config.as_ref())?;
        }
    }

    Ok(())
}
