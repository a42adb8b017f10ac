//! Engine configuration.
//!
//! The configuration is a JSON document in which every field is optional.
//! Missing fields take their defaults; the weight and window tables are
//! merged over the defaults, so `{"signal_weights": {"gap_pattern": 0}}`
//! switches one signal off and leaves the rest alone.

use std::{collections::BTreeMap, path::Path};

use almeria_combine::{
    Combiner, EqualWeightCombiner, EqualWeightConfig, NormalizerConfig, WeightedAverageCombiner,
    WeightedConfig,
};
use almeria_signals::{RegimeFilterConfig, SignalRegistry, registry::available_signals};
use almeria_traits::{AlmeriaError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// How normalized signals are combined into a composite score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMethod {
    /// Weighted average with the configured weight table.
    #[default]
    Weighted,
    /// Every active signal weighted 1.
    Equal,
}

/// Default weight of each built-in signal.
const DEFAULT_WEIGHTS: [(&str, f64); 11] = [
    ("momentum", 1.2),
    ("volume_spike", 1.0),
    ("vol_compression", 1.1),
    ("mean_reversion", 1.0),
    ("trend_quality", 0.8),
    ("relative_strength", 1.0),
    ("gap_pattern", 0.9),
    ("volume_profile", 1.0),
    ("price_acceleration", 0.9),
    ("support_resistance", 0.7),
    ("regime_filter", 0.5),
];

/// Configuration of a scoring run.
///
/// # Examples
///
/// ```
/// use almeria::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{"min_signals_required": 4}"#).unwrap();
/// assert_eq!(config.min_signals_required, 4);
/// assert_eq!(config.signal_weights["momentum"], 1.2);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weight per signal. Signals weighted 0 are not computed.
    #[serde(deserialize_with = "merge_weights")]
    pub signal_weights: BTreeMap<String, f64>,

    /// Minimum contributing signals for a security to be ranked.
    pub min_signals_required: usize,

    /// Minimum present raw values for a signal to be normalized.
    pub min_cross_sectional_sample: usize,

    /// Lookback window per signal.
    #[serde(deserialize_with = "merge_windows")]
    pub lookback_windows: BTreeMap<String, usize>,

    /// Combination method.
    pub method: CombineMethod,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signal_weights: default_weights(),
            min_signals_required: 6,
            min_cross_sectional_sample: 5,
            lookback_windows: default_windows(),
            method: CombineMethod::default(),
        }
    }
}

fn default_weights() -> BTreeMap<String, f64> {
    DEFAULT_WEIGHTS
        .iter()
        .map(|(name, weight)| ((*name).to_string(), *weight))
        .collect()
}

fn default_windows() -> BTreeMap<String, usize> {
    available_signals()
        .into_iter()
        .map(|info| (info.name.to_string(), info.default_window))
        .collect()
}

fn merge_weights<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut weights = default_weights();
    weights.extend(BTreeMap::<String, f64>::deserialize(deserializer)?);
    Ok(weights)
}

fn merge_windows<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut windows = default_windows();
    windows.extend(BTreeMap::<String, usize>::deserialize(deserializer)?);
    Ok(windows)
}

impl EngineConfig {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON for this schema.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Pretty-printed JSON of this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Names of the signals with a positive weight, in registry order.
    #[must_use]
    pub fn active_signals(&self) -> Vec<&'static str> {
        available_signals()
            .into_iter()
            .map(|info| info.name)
            .filter(|name| self.signal_weights.get(*name).is_some_and(|w| *w > 0.0))
            .collect()
    }

    /// Checks the configuration for values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`AlmeriaError::InvalidConfig`] describing the first problem
    /// found.
    pub fn validate(&self) -> Result<()> {
        let known = |name: &str| available_signals().iter().any(|info| info.name == name);
        let invalid = |msg: String| Err(AlmeriaError::InvalidConfig(msg));

        for (name, weight) in &self.signal_weights {
            if !known(name) {
                return invalid(format!("unknown signal '{name}' in signal_weights"));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return invalid(format!(
                    "weight for '{name}' must be finite and non-negative, got {weight}"
                ));
            }
        }

        for (name, window) in &self.lookback_windows {
            if !known(name) {
                return invalid(format!("unknown signal '{name}' in lookback_windows"));
            }
            if *window == 0 {
                return invalid(format!("lookback window for '{name}' must be positive"));
            }
        }

        let active = self.active_signals().len();
        if active == 0 {
            return invalid("no signal has a positive weight".to_string());
        }
        if self.min_signals_required == 0 || self.min_signals_required > active {
            return invalid(format!(
                "min_signals_required must be between 1 and the {active} active signals, got {}",
                self.min_signals_required
            ));
        }
        if self.min_cross_sectional_sample < 2 {
            return invalid(format!(
                "min_cross_sectional_sample must be at least 2, got {}",
                self.min_cross_sectional_sample
            ));
        }

        Ok(())
    }

    /// Builds the registry of active signals with the configured windows.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown signals or zero windows.
    pub fn build_registry(&self) -> Result<SignalRegistry> {
        let mut registry = SignalRegistry::with_windows(&self.lookback_windows)?;
        let active = self.active_signals();
        registry.retain(|name| active.iter().any(|a| *a == name));
        Ok(registry)
    }

    /// Normalizer settings.
    #[must_use]
    pub const fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            min_sample: self.min_cross_sectional_sample,
        }
    }

    /// Builds the combiner selected by [`EngineConfig::method`].
    #[must_use]
    pub fn build_combiner(&self) -> Box<dyn Combiner> {
        match self.method {
            CombineMethod::Weighted => Box::new(WeightedAverageCombiner::new(WeightedConfig {
                weights: self.signal_weights.clone(),
                min_signals: self.min_signals_required,
            })),
            CombineMethod::Equal => Box::new(EqualWeightCombiner::new(EqualWeightConfig {
                min_signals: self.min_signals_required,
            })),
        }
    }

    /// Regime classification settings, sharing the regime filter's window.
    #[must_use]
    pub fn regime_config(&self) -> RegimeFilterConfig {
        let defaults = RegimeFilterConfig::default();
        RegimeFilterConfig {
            window: self
                .lookback_windows
                .get("regime_filter")
                .copied()
                .unwrap_or(defaults.window),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.signal_weights.len(), 11);
        assert_eq!(config.signal_weights["momentum"], 1.2);
        assert_eq!(config.signal_weights["regime_filter"], 0.5);
        assert_eq!(config.lookback_windows["trend_quality"], 10);
        assert_eq!(config.min_signals_required, 6);
        assert_eq!(config.min_cross_sectional_sample, 5);
        assert_eq!(config.method, CombineMethod::Weighted);
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_tables_merge_over_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{"signal_weights": {"gap_pattern": 0.0}, "lookback_windows": {"momentum": 40}, "method": "equal"}"#,
        )
        .unwrap();

        assert_eq!(config.signal_weights["gap_pattern"], 0.0);
        assert_eq!(config.signal_weights["momentum"], 1.2);
        assert_eq!(config.lookback_windows["momentum"], 40);
        assert_eq!(config.lookback_windows["volume_spike"], 20);
        assert_eq!(config.method, CombineMethod::Equal);
        assert_eq!(config.active_signals().len(), 10);
        assert!(!config.active_signals().contains(&"gap_pattern"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig {
            min_signals_required: 3,
            ..EngineConfig::default()
        };
        let parsed = EngineConfig::from_json_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_unknown_signal() {
        let config = EngineConfig::from_json_str(r#"{"signal_weights": {"rsi": 1.0}}"#).unwrap();
        assert!(matches!(config.validate(), Err(AlmeriaError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_weights_and_windows() {
        let mut config = EngineConfig::default();
        config.signal_weights.insert("momentum".into(), -1.0);
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.signal_weights.insert("momentum".into(), f64::NAN);
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.lookback_windows.insert("momentum".into(), 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_thresholds() {
        let config = EngineConfig {
            min_signals_required: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            min_signals_required: 12,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            min_cross_sectional_sample: 1,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            signal_weights: BTreeMap::new(),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_registry_keeps_active_only() {
        let mut config = EngineConfig::default();
        config.signal_weights.insert("regime_filter".into(), 0.0);
        config.lookback_windows.insert("trend_quality".into(), 15);

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 10);
        assert!(registry.get("regime_filter").is_none());
        assert_eq!(registry.get("trend_quality").unwrap().lookback(), 15);
    }

    #[test]
    fn test_build_combiner() {
        assert_eq!(EngineConfig::default().build_combiner().name(), "weighted");
        let config = EngineConfig {
            method: CombineMethod::Equal,
            ..EngineConfig::default()
        };
        assert_eq!(config.build_combiner().name(), "equal_weight");
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("almeria-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"min_cross_sectional_sample": 3}"#).unwrap();
        let config = EngineConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.min_cross_sectional_sample, 3);

        assert!(matches!(
            EngineConfig::from_path("/nonexistent/almeria.json"),
            Err(AlmeriaError::Io(_))
        ));
    }
}
