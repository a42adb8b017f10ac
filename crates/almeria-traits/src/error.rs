//! Error types for the Almeria screener.
//!
//! Per-signal and per-security data problems are never errors: they surface
//! as missing values or as exclusions on the leaderboard. The variants here
//! cover what a caller must react to: malformed input, a run that cannot
//! proceed, configuration mistakes, and I/O at the edges.

use thiserror::Error;

use crate::SecurityId;

/// The main error type for Almeria operations.
#[derive(Debug, Error)]
pub enum AlmeriaError {
    /// A bar series violates the input contract (negative or non-finite
    /// values, non-increasing dates).
    #[error("Malformed input for {security}: {reason}")]
    MalformedInput {
        /// Offending security.
        security: SecurityId,
        /// What was wrong with it.
        reason: String,
    },

    /// No usable security was supplied for the run.
    #[error("Universe is empty")]
    EmptyUniverse,

    /// The benchmark series was absent or empty.
    #[error("Benchmark series is missing")]
    MissingBenchmark,

    /// Engine configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when a signal is not found.
    #[error("Signal not found: {0}")]
    SignalNotFound(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl AlmeriaError {
    /// Shorthand for a [`AlmeriaError::MalformedInput`].
    pub fn malformed(security: impl Into<SecurityId>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            security: security.into(),
            reason: reason.into(),
        }
    }
}

impl From<String> for AlmeriaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for AlmeriaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Almeria operations.
pub type Result<T> = std::result::Result<T, AlmeriaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AlmeriaError::malformed("INFY", "dates not increasing at row 3");
        assert_eq!(
            err.to_string(),
            "Malformed input for INFY: dates not increasing at row 3"
        );

        let err = AlmeriaError::MissingColumn("close".to_string());
        assert_eq!(err.to_string(), "Missing required column: close");

        assert_eq!(
            AlmeriaError::MissingBenchmark.to_string(),
            "Benchmark series is missing"
        );
    }

    #[test]
    fn test_error_from_str() {
        let err: AlmeriaError = "boom".into();
        assert!(matches!(err, AlmeriaError::Other(ref s) if s == "boom"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: AlmeriaError = parse.unwrap_err().into();
        assert!(matches!(err, AlmeriaError::Json(_)));
    }
}
