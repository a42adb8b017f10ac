//! Explain command implementation.

use std::path::PathBuf;

use almeria::{Engine, traits::Orientation};
use anyhow::{Result, bail};

use crate::{cmd::rank::fmt_opt, data};

/// Arguments of the explain command.
#[derive(Debug)]
pub(crate) struct ExplainArgs {
    pub(crate) bars: PathBuf,
    pub(crate) symbol: String,
    pub(crate) benchmark: String,
    pub(crate) benchmark_file: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
}

/// How far a z-score is from the cross-sectional mean.
fn strength(z: f64) -> &'static str {
    match z.abs() {
        a if a > 1.0 => "STRONG",
        a if a > 0.5 => "MODERATE",
        _ => "WEAK",
    }
}

/// Whether a z-score helps or hurts the composite.
fn direction(z: f64, orientation: Orientation) -> &'static str {
    let contribution = z * orientation.sign();
    if contribution > 0.0 {
        "BULLISH"
    } else if contribution < 0.0 {
        "BEARISH"
    } else {
        "NEUTRAL"
    }
}

/// Print the per-signal detail behind one security's score.
pub(crate) fn explain(args: &ExplainArgs) -> Result<()> {
    let config = data::load_config(args.config.as_ref())?;
    let (universe, benchmark) =
        data::load_universe(&args.bars, &args.benchmark, args.benchmark_file.as_deref())?;

    let Some(series) = universe.iter().find(|s| s.security_id() == args.symbol) else {
        bail!("{} is not in {}", args.symbol, args.bars.display());
    };

    let engine = Engine::new(config)?;
    let board = engine.run(&universe, benchmark.as_ref())?;

    println!("\n{}", "=".repeat(60));
    println!("DETAILED ANALYSIS: {}", args.symbol);
    println!("{}", "=".repeat(60));

    if let Some(rejected) = board.rejected.iter().find(|r| r.security_id == args.symbol) {
        println!("Rejected: {}\n", rejected.reason);
        return Ok(());
    }

    let breakdown = match board.entry(&args.symbol) {
        Some(entry) => {
            let d = &entry.diagnostics;
            println!("Rank:              {} of {}", entry.rank, board.len());
            println!("Composite Score:   {:.4}", entry.score);
            println!("Signals:           {}", entry.signal_count);
            println!("Last Price:        {}", fmt_opt(d.last_close, 2));
            println!("1-Day Change:      {}%", fmt_opt(d.change_1d, 2));
            println!("5-Day Change:      {}%", fmt_opt(d.change_5d, 2));
            println!("20-Day Volatility: {}%", fmt_opt(d.volatility_20d, 2));
            entry.breakdown.clone()
        }
        None => {
            let entry = board
                .insufficient_data
                .iter()
                .find(|e| e.security_id == args.symbol);
            println!(
                "Not ranked: {} of {} required signals available",
                entry.map_or(0, |e| e.signal_count),
                engine.config().min_signals_required
            );
            entry.map(|e| e.breakdown.clone()).unwrap_or_default()
        }
    };

    println!("\nSignal Breakdown:");
    println!("{}", "-".repeat(60));
    println!("  {:<20} {:>10} {:>8}", "Signal", "Raw", "Z");
    for raw in engine.raw_values(series, benchmark.as_ref()) {
        let orientation = engine
            .registry()
            .get(&raw.signal_name)
            .map(|s| s.orientation())
            .unwrap_or_default();
        match breakdown.get(&raw.signal_name) {
            Some(&z) => println!(
                "  {:<20} {:>10} {:>8.3}  [{} - {}]",
                raw.signal_name,
                fmt_opt(raw.value, 4),
                z,
                direction(z, orientation),
                strength(z)
            ),
            None => println!(
                "  {:<20} {:>10} {:>8}",
                raw.signal_name,
                fmt_opt(raw.value, 4),
                "-"
            ),
        }
    }
    println!();

    Ok(())
}
