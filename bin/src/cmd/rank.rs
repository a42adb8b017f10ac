//! Rank command implementation.

use std::{io, path::PathBuf};

use almeria::{Engine, Leaderboard, rank::RankedEntry};
use anyhow::Result;
use clap::ValueEnum;
use polars::prelude::*;

use crate::data;

/// Output format of the rank command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Full leaderboard as JSON
    Json,
    /// Ranked list as CSV
    Csv,
}

/// Arguments of the rank command.
#[derive(Debug)]
pub(crate) struct RankArgs {
    pub(crate) bars: PathBuf,
    pub(crate) benchmark: String,
    pub(crate) benchmark_file: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) format: OutputFormat,
    pub(crate) top: usize,
    pub(crate) bottom: usize,
}

/// Run the engine over a bar file and print the leaderboard.
pub(crate) fn rank(args: &RankArgs) -> Result<()> {
    let config = data::load_config(args.config.as_ref())?;
    let (universe, benchmark) =
        data::load_universe(&args.bars, &args.benchmark, args.benchmark_file.as_deref())?;

    let engine = Engine::new(config)?;
    let board = engine.run(&universe, benchmark.as_ref())?;

    match args.format {
        OutputFormat::Json => println!("{}", board.to_json()?),
        OutputFormat::Csv => {
            let mut df = board.to_frame()?;
            CsvWriter::new(io::stdout().lock())
                .include_header(true)
                .finish(&mut df)?;
        }
        OutputFormat::Text => print_report(&board, args.top, args.bottom),
    }

    Ok(())
}

fn print_report(board: &Leaderboard, top: usize, bottom: usize) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Daily Screener Leaderboard                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    match board.as_of {
        Some(date) => println!("As of:   {date}"),
        None => println!("As of:   -"),
    }
    match board.regime {
        Some(regime) => println!("Regime:  {regime}"),
        None => println!("Regime:  unknown (benchmark too short)"),
    }
    println!(
        "Ranked:  {}  (insufficient data: {}, rejected: {})\n",
        board.len(),
        board.insufficient_data.len(),
        board.rejected.len()
    );

    println!("TOP {top}");
    print_table(&board.top(top, f64::NEG_INFINITY));

    if bottom > 0 {
        let tail = board.bottom(bottom, 0.0);
        if !tail.is_empty() {
            println!("\nBOTTOM (avoid)");
            print_table(&tail);
        }
    }

    if !board.insufficient_data.is_empty() {
        println!("\nInsufficient data:");
        for entry in &board.insufficient_data {
            println!("  {:<15} {} signals", entry.security_id, entry.signal_count);
        }
    }

    if !board.rejected.is_empty() {
        println!("\nRejected:");
        for rejected in &board.rejected {
            println!("  {:<15} {}", rejected.security_id, rejected.reason);
        }
    }
    println!();
}

fn print_table(entries: &[&RankedEntry]) {
    println!(
        "{:>5} {:<15} {:>8} {:>8} {:>8} {:>8} {:>14}",
        "Rank", "Symbol", "Score", "Signals", "1D%", "5D%", "Avg Volume"
    );
    println!("{}", "-".repeat(70));
    for entry in entries {
        let d = &entry.diagnostics;
        println!(
            "{:>5} {:<15} {:>8.3} {:>8} {:>8} {:>8} {:>14}",
            entry.rank,
            entry.security_id,
            entry.score,
            entry.signal_count,
            fmt_opt(d.change_1d, 2),
            fmt_opt(d.change_5d, 2),
            fmt_opt(d.avg_volume, 0),
        );
    }
}

/// Formats an optional number, `-` when missing.
pub(crate) fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}
