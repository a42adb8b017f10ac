//! Signal registry for discovering, configuring and looking up signals.
//!
//! Signals are stored as trait objects keyed by name, so the normalizer,
//! scorer and ranker never branch on a particular signal. Adding a signal
//! means implementing [`Signal`] and listing it in [`available_signals`] and
//! the builder below.

use std::{collections::BTreeMap, fmt};

use almeria_traits::{AlmeriaError, Orientation, Result, Signal};
use serde::{Deserialize, Serialize};

use crate::{
    momentum::{Momentum, MomentumConfig, PriceAcceleration, PriceAccelerationConfig},
    regime::{RegimeFilter, RegimeFilterConfig},
    reversion::{
        MeanReversion, MeanReversionConfig, SupportResistance, SupportResistanceConfig,
    },
    trend::{RelativeStrength, RelativeStrengthConfig, TrendQuality, TrendQualityConfig},
    volatility::{GapPattern, GapPatternConfig, VolCompression, VolCompressionConfig},
    volume::{VolumeProfile, VolumeProfileConfig, VolumeSpike, VolumeSpikeConfig},
};

/// Signal category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalCategory {
    /// Price momentum signals
    Momentum,
    /// Volume activity signals
    Volume,
    /// Realized volatility and range signals
    Volatility,
    /// Mean reversion and band position signals
    Reversion,
    /// Trend shape and relative performance signals
    Trend,
    /// Market-wide regime signals
    Regime,
}

impl SignalCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Momentum => "Price momentum and acceleration",
            Self::Volume => "Unusual volume and accumulation/distribution",
            Self::Volatility => "Volatility squeezes and opening gaps",
            Self::Reversion => "Statistical stretch from the mean and band position",
            Self::Trend => "Trend straightness and strength against the benchmark",
            Self::Regime => "Benchmark market state applied to the whole universe",
        }
    }

    /// All categories in display order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Momentum,
            Self::Volume,
            Self::Volatility,
            Self::Reversion,
            Self::Trend,
            Self::Regime,
        ]
    }
}

/// Metadata about a signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalInfo {
    /// Unique identifier for the signal
    pub name: &'static str,

    /// Category classification
    pub category: SignalCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Default window; what `lookback_windows` overrides
    pub default_window: usize,

    /// Whether the signal reads the benchmark series
    pub requires_benchmark: bool,

    /// Which direction of the signal is attractive
    pub orientation: Orientation,
}

/// Get information about all available signals, in registry order.
#[must_use]
pub fn available_signals() -> Vec<SignalInfo> {
    use Orientation::{HigherIsBetter, LowerIsBetter};

    vec![
        SignalInfo {
            name: "momentum",
            category: SignalCategory::Momentum,
            description: "Weighted 5/10/20-bar price change, recent windows weighted highest",
            default_window: 20,
            requires_benchmark: false,
            orientation: HigherIsBetter,
        },
        SignalInfo {
            name: "volume_spike",
            category: SignalCategory::Volume,
            description: "Today's volume over its trailing average",
            default_window: 20,
            requires_benchmark: false,
            orientation: HigherIsBetter,
        },
        SignalInfo {
            name: "vol_compression",
            category: SignalCategory::Volatility,
            description: "Short over long realized volatility (below 1 is a squeeze)",
            default_window: 20,
            requires_benchmark: false,
            orientation: LowerIsBetter,
        },
        SignalInfo {
            name: "mean_reversion",
            category: SignalCategory::Reversion,
            description: "Close minus rolling mean in rolling standard deviations",
            default_window: 20,
            requires_benchmark: false,
            orientation: LowerIsBetter,
        },
        SignalInfo {
            name: "trend_quality",
            category: SignalCategory::Trend,
            description: "Net move over total path length (straightness, 0..1)",
            default_window: 10,
            requires_benchmark: false,
            orientation: HigherIsBetter,
        },
        SignalInfo {
            name: "relative_strength",
            category: SignalCategory::Trend,
            description: "Return minus benchmark return over the same dates",
            default_window: 20,
            requires_benchmark: true,
            orientation: HigherIsBetter,
        },
        SignalInfo {
            name: "gap_pattern",
            category: SignalCategory::Volatility,
            description: "Open versus prior close in units of average true range",
            default_window: 14,
            requires_benchmark: false,
            orientation: HigherIsBetter,
        },
        SignalInfo {
            name: "volume_profile",
            category: SignalCategory::Volume,
            description: "Up-day minus down-day volume over total volume",
            default_window: 10,
            requires_benchmark: false,
            orientation: HigherIsBetter,
        },
        SignalInfo {
            name: "price_acceleration",
            category: SignalCategory::Momentum,
            description: "Change in momentum over a short period",
            default_window: 5,
            requires_benchmark: false,
            orientation: HigherIsBetter,
        },
        SignalInfo {
            name: "support_resistance",
            category: SignalCategory::Reversion,
            description: "Position of the close inside the recent high/low band (0..1)",
            default_window: 20,
            requires_benchmark: false,
            orientation: HigherIsBetter,
        },
        SignalInfo {
            name: "regime_filter",
            category: SignalCategory::Regime,
            description: "Benchmark trending/ranging state, identical for every security",
            default_window: 20,
            requires_benchmark: true,
            orientation: HigherIsBetter,
        },
    ]
}

/// Get all signals in a specific category.
#[must_use]
pub fn signals_by_category(category: &SignalCategory) -> Vec<SignalInfo> {
    available_signals()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a specific signal by name.
#[must_use]
pub fn get_signal_info(name: &str) -> Option<SignalInfo> {
    available_signals()
        .into_iter()
        .find(|info| info.name == name)
}

/// Builds the named signal with its window resolved through `window_of`.
///
/// `price_acceleration` also resolves the `momentum` window, since it
/// differences that signal.
fn build_signal(name: &str, window_of: &dyn Fn(&str) -> usize) -> Option<Box<dyn Signal>> {
    let window = window_of(name);
    let signal: Box<dyn Signal> = match name {
        "momentum" => Box::new(Momentum::new(MomentumConfig::with_window(window))),
        "volume_spike" => Box::new(VolumeSpike::new(VolumeSpikeConfig { window })),
        "vol_compression" => Box::new(VolCompression::new(VolCompressionConfig::with_window(
            window,
        ))),
        "mean_reversion" => Box::new(MeanReversion::new(MeanReversionConfig { window })),
        "trend_quality" => Box::new(TrendQuality::new(TrendQualityConfig { window })),
        "relative_strength" => Box::new(RelativeStrength::new(RelativeStrengthConfig { window })),
        "gap_pattern" => Box::new(GapPattern::new(GapPatternConfig { atr_window: window })),
        "volume_profile" => Box::new(VolumeProfile::new(VolumeProfileConfig { window })),
        "price_acceleration" => Box::new(PriceAcceleration::new(PriceAccelerationConfig {
            momentum: MomentumConfig::with_window(window_of("momentum")),
            period: window,
        })),
        "support_resistance" => {
            Box::new(SupportResistance::new(SupportResistanceConfig { window }))
        }
        "regime_filter" => Box::new(RegimeFilter::new(RegimeFilterConfig {
            window,
            ..RegimeFilterConfig::default()
        })),
        _ => return None,
    };
    Some(signal)
}

/// Ordered collection of signals keyed by name.
///
/// # Example
///
/// ```
/// use almeria_signals::SignalRegistry;
///
/// let registry = SignalRegistry::with_defaults();
/// assert_eq!(registry.len(), 11);
/// assert!(registry.get("momentum").is_some());
/// ```
#[derive(Default)]
pub struct SignalRegistry {
    signals: Vec<Box<dyn Signal>>,
}

impl SignalRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in signal at its default window.
    #[must_use]
    pub fn with_defaults() -> Self {
        let defaults = default_window;
        Self {
            signals: available_signals()
                .iter()
                .filter_map(|info| build_signal(info.name, &defaults))
                .collect(),
        }
    }

    /// Creates a registry with every built-in signal, overriding the windows
    /// named in `windows`.
    ///
    /// # Errors
    ///
    /// Returns [`AlmeriaError::SignalNotFound`] for an unknown name and
    /// [`AlmeriaError::InvalidConfig`] for a zero window.
    pub fn with_windows(windows: &BTreeMap<String, usize>) -> Result<Self> {
        for (name, &window) in windows {
            if get_signal_info(name).is_none() {
                return Err(AlmeriaError::SignalNotFound(name.clone()));
            }
            if window == 0 {
                return Err(AlmeriaError::InvalidConfig(format!(
                    "lookback window for '{name}' must be positive"
                )));
            }
        }

        let window_of = |name: &str| {
            windows
                .get(name)
                .copied()
                .unwrap_or_else(|| default_window(name))
        };
        Ok(Self {
            signals: available_signals()
                .iter()
                .filter_map(|info| build_signal(info.name, &window_of))
                .collect(),
        })
    }

    /// Adds a signal.
    ///
    /// # Errors
    ///
    /// Returns [`AlmeriaError::InvalidConfig`] if a signal with the same name
    /// is already registered.
    pub fn register(&mut self, signal: Box<dyn Signal>) -> Result<()> {
        if self.get(signal.name()).is_some() {
            return Err(AlmeriaError::InvalidConfig(format!(
                "signal '{}' is already registered",
                signal.name()
            )));
        }
        self.signals.push(signal);
        Ok(())
    }

    /// Keeps only the signals for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.signals.retain(|signal| keep(signal.name()));
    }

    /// Looks up a signal by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Signal> {
        self.signals
            .iter()
            .find(|signal| signal.name() == name)
            .map(|signal| signal.as_ref())
    }

    /// Iterates over the signals in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Signal> {
        self.signals.iter().map(|signal| signal.as_ref())
    }

    /// Signal names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.signals.iter().map(|signal| signal.name()).collect()
    }

    /// Number of registered signals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether no signal is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalRegistry")
            .field("signals", &self.names())
            .finish()
    }
}

fn default_window(name: &str) -> usize {
    get_signal_info(name).map_or(0, |info| info.default_window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixtures::*;

    #[test]
    fn test_available_signals() {
        let signals = available_signals();
        assert_eq!(signals.len(), 11);

        let mut names: Vec<_> = signals.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_signals_by_category() {
        assert_eq!(signals_by_category(&SignalCategory::Momentum).len(), 2);
        assert_eq!(signals_by_category(&SignalCategory::Volume).len(), 2);
        assert_eq!(signals_by_category(&SignalCategory::Regime).len(), 1);

        let total: usize = SignalCategory::all()
            .iter()
            .map(|c| signals_by_category(c).len())
            .sum();
        assert_eq!(total, 11);
    }

    #[test]
    fn test_get_signal_info() {
        let info = get_signal_info("relative_strength").unwrap();
        assert_eq!(info.category, SignalCategory::Trend);
        assert!(info.requires_benchmark);
        assert_eq!(info.default_window, 20);

        assert!(get_signal_info("nonexistent_signal").is_none());
    }

    #[test]
    fn test_category_descriptions() {
        for category in SignalCategory::all() {
            assert!(!category.description().is_empty());
        }
    }

    #[test]
    fn test_registry_matches_metadata() {
        let registry = SignalRegistry::with_defaults();
        assert_eq!(registry.len(), available_signals().len());
        for info in available_signals() {
            let signal = registry.get(info.name).unwrap();
            assert_eq!(signal.name(), info.name);
            assert_eq!(signal.orientation(), info.orientation);
            assert_eq!(signal.benchmark_lookback() > 0, info.requires_benchmark);
        }
    }

    #[test]
    fn test_default_lookbacks() {
        let registry = SignalRegistry::with_defaults();
        let lookback = |name: &str| registry.get(name).unwrap().lookback();
        assert_eq!(lookback("momentum"), 20);
        assert_eq!(lookback("trend_quality"), 10);
        assert_eq!(lookback("volume_profile"), 10);
        assert_eq!(lookback("gap_pattern"), 16);
        assert_eq!(lookback("price_acceleration"), 25);
    }

    #[test]
    fn test_with_windows_overrides() {
        let mut windows = BTreeMap::new();
        windows.insert("momentum".to_string(), 40);
        windows.insert("trend_quality".to_string(), 15);
        let registry = SignalRegistry::with_windows(&windows).unwrap();

        assert_eq!(registry.get("momentum").unwrap().lookback(), 40);
        assert_eq!(registry.get("trend_quality").unwrap().lookback(), 15);
        // Acceleration follows the momentum window.
        assert_eq!(registry.get("price_acceleration").unwrap().lookback(), 45);
        assert_eq!(registry.get("volume_spike").unwrap().lookback(), 20);
    }

    #[test]
    fn test_with_windows_rejects_bad_input() {
        let mut windows = BTreeMap::new();
        windows.insert("day_of_week".to_string(), 5);
        assert!(matches!(
            SignalRegistry::with_windows(&windows),
            Err(AlmeriaError::SignalNotFound(_))
        ));

        let mut windows = BTreeMap::new();
        windows.insert("momentum".to_string(), 0);
        assert!(matches!(
            SignalRegistry::with_windows(&windows),
            Err(AlmeriaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_register_and_retain() {
        let mut registry = SignalRegistry::new();
        registry.register(Box::new(Momentum::default())).unwrap();
        assert!(registry.register(Box::new(Momentum::default())).is_err());
        registry.register(Box::new(TrendQuality::default())).unwrap();
        assert_eq!(registry.names(), vec!["momentum", "trend_quality"]);

        registry.retain(|name| name != "momentum");
        assert_eq!(registry.names(), vec!["trend_quality"]);
    }

    #[test]
    fn test_short_series_misses_every_signal() {
        let registry = SignalRegistry::with_defaults();
        let series = series_from_closes("X", &rising(8));
        let bench = series_from_closes("NIFTY", &rising(30));
        for signal in registry.iter() {
            assert_eq!(signal.evaluate(&series, Some(&bench)), None, "{}", signal.name());
        }
    }
}
