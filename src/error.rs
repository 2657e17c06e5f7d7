//! Error types for engine configuration and input loading

use thiserror::Error;

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Invalid inputs rejected at the API boundary
///
/// Every resampler, projection and valuation entry point validates its inputs
/// once and returns one of these instead of producing a plausible-looking but
/// wrong numeric result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("return series is empty")]
    EmptySeries,

    #[error("{name} contains a non-finite value at index {index}")]
    NonFiniteValue { name: &'static str, index: usize },

    #[error("block length must be positive")]
    InvalidBlockLength,

    #[error("insufficient history: series has {len} returns but block length is {block_length}")]
    InsufficientHistory { len: usize, block_length: usize },

    #[error("crisis period [{start}, {end}) is empty or reversed")]
    InvalidCrisisPeriod { start: usize, end: usize },

    #[error("crisis period [{start}, {end}) extends past series of length {len}")]
    CrisisPeriodOutOfRange { start: usize, end: usize, len: usize },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("intensity distribution sums to {sum}, expected 1")]
    UnnormalizedDistribution { sum: f64 },

    #[error("intensity distribution needs at least {min} tiers, got {got}")]
    InvalidDistribution { min: usize, got: usize },

    #[error("current age {current_age} must not exceed max age {max_age}")]
    InvalidAgeRange { current_age: u8, max_age: u8 },

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("predefined block list has {available} entries but {needed} are required")]
    PredefinedBlocksExhausted { needed: usize, available: usize },
}

impl ConfigurationError {
    /// Reject a probability outside [0, 1] (or NaN)
    pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<()> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidProbability { name, value })
        }
    }

    /// Reject a rate that is non-finite or at or below -100%
    pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<()> {
        if value.is_finite() && value > -1.0 {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidParameter { name, value })
        }
    }

    /// Reject a slice containing NaN or infinities
    pub(crate) fn check_finite(name: &'static str, values: &[f64]) -> Result<()> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(ConfigurationError::NonFiniteValue { name, index }),
            None => Ok(()),
        }
    }
}

/// Errors raised while loading histories or crisis windows from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
