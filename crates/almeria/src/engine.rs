//! The daily scoring pipeline.
//!
//! One run takes a universe of bar series and a benchmark series and
//! produces a [`Leaderboard`]:
//!
//! 1. validate the inputs, rejecting malformed series;
//! 2. compute every active signal for every security (parallel over
//!    securities);
//! 3. normalize each signal across the universe (parallel over signals, once
//!    every raw value exists);
//! 4. combine each security's z-scores into a composite score;
//! 5. rank.

use std::collections::{BTreeMap, HashMap, HashSet};

use almeria_combine::{Combiner, CrossSectionalNormalizer, NormalizationStats, SignalScore};
use almeria_rank::{Diagnostics, Leaderboard, Ranker, RejectedSeries};
use almeria_signals::{SignalRegistry, classify_regime};
use almeria_traits::{
    AlmeriaError, BarSeries, CompositeScore, MarketData, RawSignalValue, Result,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;

/// Runs the signal → normalize → score → rank pipeline.
///
/// An engine is immutable and can be shared across threads; every run
/// recomputes everything from its inputs.
pub struct Engine {
    config: EngineConfig,
    registry: SignalRegistry,
    normalizer: CrossSectionalNormalizer,
    combiner: Box<dyn Combiner>,
    ranker: Ranker,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("combiner", &self.combiner.name())
            .finish()
    }
}

impl Engine {
    /// Creates an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AlmeriaError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: config.build_registry()?,
            normalizer: CrossSectionalNormalizer::new(config.normalizer_config()),
            combiner: config.build_combiner(),
            ranker: Ranker::new(),
            config,
        })
    }

    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in defaults; the signature matches
    /// [`Engine::new`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the active signals.
    #[must_use]
    pub const fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Raw value of every active signal for one security, in registry order.
    #[must_use]
    pub fn raw_values(&self, series: &BarSeries, benchmark: Option<&BarSeries>) -> Vec<RawSignalValue> {
        self.registry
            .iter()
            .map(|signal| RawSignalValue {
                security_id: series.security_id().to_string(),
                signal_name: signal.name().to_string(),
                value: signal.evaluate(series, benchmark),
            })
            .collect()
    }

    /// Scores and ranks `universe` against `benchmark`.
    ///
    /// # Errors
    ///
    /// - [`AlmeriaError::EmptyUniverse`] if `universe` is empty or every
    ///   series in it is malformed.
    /// - [`AlmeriaError::MissingBenchmark`] if the benchmark is absent or
    ///   has no bars.
    /// - [`AlmeriaError::MalformedInput`] if the benchmark is malformed.
    pub fn run(&self, universe: &[BarSeries], benchmark: Option<&BarSeries>) -> Result<Leaderboard> {
        if universe.is_empty() {
            return Err(AlmeriaError::EmptyUniverse);
        }
        let benchmark = benchmark
            .filter(|b| !b.is_empty())
            .ok_or(AlmeriaError::MissingBenchmark)?;
        benchmark.validate()?;

        let (valid, rejected) = screen(universe);
        if valid.is_empty() {
            return Err(AlmeriaError::EmptyUniverse);
        }

        // Fan-out: one raw row per security.
        let rows: Vec<Vec<RawSignalValue>> = valid
            .par_iter()
            .map(|series| self.raw_values(series, Some(benchmark)))
            .collect();

        // Barrier: every raw value exists before any column is normalized.
        let columns: Vec<(Vec<Option<f64>>, NormalizationStats)> = (0..self.registry.len())
            .into_par_iter()
            .map(|j| {
                let column: Vec<Option<f64>> = rows.iter().map(|row| row[j].value).collect();
                self.normalizer.normalize_values(&column)
            })
            .collect();

        let mut normalization = BTreeMap::new();
        for (signal, (_, stats)) in self.registry.iter().zip(&columns) {
            debug!(
                signal = signal.name(),
                sample_size = stats.sample_size,
                mean = ?stats.mean,
                std = ?stats.std,
                applied = stats.applied,
                "normalized signal"
            );
            normalization.insert(signal.name().to_string(), *stats);
        }

        let scores: Vec<CompositeScore> = valid
            .par_iter()
            .enumerate()
            .map(|(i, series)| {
                let signals: Vec<SignalScore> = self
                    .registry
                    .iter()
                    .zip(&columns)
                    .map(|(signal, (values, _))| {
                        SignalScore::new(signal.name(), values[i])
                            .with_orientation(signal.orientation())
                    })
                    .collect();
                self.combiner.combine(series.security_id(), &signals)
            })
            .collect();

        let by_id: HashMap<&str, &BarSeries> = valid
            .iter()
            .map(|series| (series.security_id(), *series))
            .collect();
        let ranking = self.ranker.rank(scores, |id| {
            by_id
                .get(id)
                .map(|series| Diagnostics::from_series(series))
                .unwrap_or_default()
        });

        let as_of = valid.iter().filter_map(|series| series.last_date()).max();
        let regime = classify_regime(benchmark, &self.config.regime_config());

        info!(
            universe = universe.len(),
            ranked = ranking.ranked.len(),
            insufficient = ranking.insufficient_data.len(),
            rejected = rejected.len(),
            ?as_of,
            ?regime,
            "scoring run complete"
        );

        Ok(Leaderboard::new(ranking)
            .with_as_of(as_of)
            .with_regime(regime)
            .with_rejected(rejected)
            .with_normalization(normalization))
    }

    /// Splits a long-format frame into series, takes the benchmark out by
    /// symbol, and runs the pipeline on the rest.
    ///
    /// # Errors
    ///
    /// Returns [`AlmeriaError::MissingBenchmark`] if `benchmark_symbol` does
    /// not occur in the frame, plus everything [`MarketData::to_bar_series`]
    /// and [`Engine::run`] return.
    pub fn run_market_data(&self, data: &MarketData, benchmark_symbol: &str) -> Result<Leaderboard> {
        let (universe, benchmark) = split_benchmark(data.to_bar_series()?, benchmark_symbol);
        let benchmark = benchmark.ok_or(AlmeriaError::MissingBenchmark)?;
        self.run(&universe, Some(&benchmark))
    }
}

/// Separates the benchmark series from the universe.
pub fn split_benchmark(
    series: Vec<BarSeries>,
    benchmark_symbol: &str,
) -> (Vec<BarSeries>, Option<BarSeries>) {
    let (benchmark, universe): (Vec<_>, Vec<_>) = series
        .into_iter()
        .partition(|s| s.security_id() == benchmark_symbol);
    (universe, benchmark.into_iter().next())
}

/// Validates every series, keeping the good ones in input order.
fn screen(universe: &[BarSeries]) -> (Vec<&BarSeries>, Vec<RejectedSeries>) {
    let mut valid = Vec::with_capacity(universe.len());
    let mut rejected = Vec::new();
    let mut seen = HashSet::new();

    for series in universe {
        let outcome = if seen.insert(series.security_id()) {
            series.validate()
        } else {
            Err(AlmeriaError::malformed(series.security_id(), "duplicate security"))
        };

        match outcome {
            Ok(()) => valid.push(series),
            Err(err) => {
                let reason = match err {
                    AlmeriaError::MalformedInput { reason, .. } => reason,
                    other => other.to_string(),
                };
                warn!(security = series.security_id(), %reason, "rejecting series");
                rejected.push(RejectedSeries {
                    security_id: series.security_id().to_string(),
                    reason,
                });
            }
        }
    }

    (valid, rejected)
}
