//! Data loading utilities for the almeria CLI.

use std::path::{Path, PathBuf};

use almeria::{BarSeries, EngineConfig, MarketData, split_benchmark};
use anyhow::{Context, Result, bail};
use polars::prelude::*;

/// Load a long-format bar CSV (`symbol,date,open,high,low,close,volume`).
///
/// Dates must be `YYYY-MM-DD`. Empty cells become absent bar fields.
pub(crate) fn load_market_data(path: &Path) -> Result<MarketData> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|opts| opts.with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let dtype = df
        .column("date")
        .with_context(|| format!("{} has no date column", path.display()))?
        .dtype()
        .clone();
    if dtype != DataType::Date {
        let dates = df.column("date")?.cast(&DataType::Date)?;
        df.with_column(dates)?;
    }

    Ok(MarketData::new(df))
}

/// Load the universe and the benchmark.
///
/// The benchmark is taken from `benchmark_file` when given (by symbol, or
/// its only series), otherwise it is pulled out of the bar file by symbol.
pub(crate) fn load_universe(
    bars: &Path,
    benchmark: &str,
    benchmark_file: Option<&Path>,
) -> Result<(Vec<BarSeries>, Option<BarSeries>)> {
    let series = load_market_data(bars)?.to_bar_series()?;
    let (universe, from_bars) = split_benchmark(series, benchmark);

    let Some(path) = benchmark_file else {
        return Ok((universe, from_bars));
    };

    let mut candidates = load_market_data(path)?.to_bar_series()?;
    let position = candidates
        .iter()
        .position(|s| s.security_id() == benchmark)
        .or_else(|| (candidates.len() == 1).then_some(0));
    match position {
        Some(i) => Ok((universe, Some(candidates.swap_remove(i)))),
        None => bail!("{} does not contain benchmark {benchmark}", path.display()),
    }
}

/// Load the engine configuration from `path`, or the defaults.
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
