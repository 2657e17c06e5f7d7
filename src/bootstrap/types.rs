//! Inputs and outputs shared by the block bootstrap resamplers

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// Default block length (months or years, matching the history's period)
pub const DEFAULT_BLOCK_LENGTH: usize = 12;

/// Default probability of drawing a crisis block in stratified sampling
pub const DEFAULT_CRISIS_WEIGHT: f64 = 0.3;

/// Longest block drawn by the crisis-stratified resampler
pub const CRISIS_BLOCK_LENGTH: usize = 12;

/// Attempts made to find a non-crisis block before accepting any block
pub const MAX_NORMAL_BLOCK_ATTEMPTS: usize = 100;

/// Block-start indices chosen for one synthetic sequence
pub type BlockIndexSet = Vec<usize>;

/// Synthetic return path of exactly the requested length
pub type BootstrapSequence = Vec<f64>;

/// Ordered historical per-period returns
///
/// Always non-empty and finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ReturnSeries {
    returns: Vec<f64>,
}

impl ReturnSeries {
    pub fn new(returns: Vec<f64>) -> Result<Self> {
        if returns.is_empty() {
            return Err(ConfigurationError::EmptySeries);
        }
        ConfigurationError::check_finite("return series", &returns)?;
        Ok(Self { returns })
    }

    /// Wrap a built-in table already known to be non-empty and finite
    pub(crate) fn from_table(returns: Vec<f64>) -> Self {
        debug_assert!(!returns.is_empty() && returns.iter().all(|r| r.is_finite()));
        Self { returns }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.returns
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Fail unless the series is strictly longer than `block_length`
    ///
    /// A start index is drawn from `[0, len - block_length)`, which is empty
    /// when the history is not longer than one block.
    pub fn require_longer_than(&self, block_length: usize) -> Result<()> {
        if block_length == 0 {
            return Err(ConfigurationError::InvalidBlockLength);
        }
        if self.returns.len() <= block_length {
            return Err(ConfigurationError::InsufficientHistory {
                len: self.returns.len(),
                block_length,
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<f64>> for ReturnSeries {
    type Error = ConfigurationError;

    fn try_from(returns: Vec<f64>) -> Result<Self> {
        Self::new(returns)
    }
}

impl From<ReturnSeries> for Vec<f64> {
    fn from(series: ReturnSeries) -> Self {
        series.returns
    }
}

impl AsRef<[f64]> for ReturnSeries {
    fn as_ref(&self) -> &[f64] {
        &self.returns
    }
}

/// Historically stressed interval `[start, end)` of a return series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisPeriod {
    pub start: usize,
    pub end: usize,
}

impl CrisisPeriod {
    pub fn new(start: usize, end: usize) -> Result<Self> {
        let period = Self { start, end };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(ConfigurationError::InvalidCrisisPeriod {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of periods covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the block `[block_start, block_start + block_length)` touches this period
    pub fn overlaps(&self, block_start: usize, block_length: usize) -> bool {
        block_start < self.end && self.start < block_start + block_length
    }
}

/// One equity path plus the block structure that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedSequence {
    pub sequence: BootstrapSequence,
    pub block_indices: BlockIndexSet,
}

/// Equity, bond and alternative paths drawn from one shared block structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiAssetBootstrapResult {
    pub equity: CorrelatedSequence,
    pub bonds: CorrelatedSequence,
    pub alternatives: CorrelatedSequence,
}

impl MultiAssetBootstrapResult {
    /// Block structure shared by all three asset classes
    pub fn block_indices(&self) -> &[usize] {
        &self.equity.block_indices
    }
}

/// Historical return series for each modelled asset class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHistories {
    pub equity: ReturnSeries,
    pub bonds: ReturnSeries,
    pub alternatives: ReturnSeries,
}

/// Resampling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Length of each contiguous block
    pub block_length: usize,

    /// Probability that a stratified draw comes from a crisis period
    pub crisis_weight: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            block_length: DEFAULT_BLOCK_LENGTH,
            crisis_weight: DEFAULT_CRISIS_WEIGHT,
        }
    }
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.block_length == 0 {
            return Err(ConfigurationError::InvalidBlockLength);
        }
        ConfigurationError::check_probability("crisis_weight", self.crisis_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_series_validation() {
        assert_eq!(ReturnSeries::new(vec![]), Err(ConfigurationError::EmptySeries));
        assert!(ReturnSeries::new(vec![0.1, f64::NAN]).is_err());

        let series = ReturnSeries::new(vec![0.1, -0.2, 0.05]).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.require_longer_than(2).is_ok());
        assert_eq!(
            series.require_longer_than(3),
            Err(ConfigurationError::InsufficientHistory { len: 3, block_length: 3 })
        );
        assert_eq!(series.require_longer_than(0), Err(ConfigurationError::InvalidBlockLength));
    }

    #[test]
    fn test_return_series_deserialize_rejects_empty() {
        let parsed: std::result::Result<ReturnSeries, _> = serde_json::from_str("[]");
        assert!(parsed.is_err());

        let parsed: ReturnSeries = serde_json::from_str("[0.1, 0.2]").unwrap();
        assert_eq!(parsed.as_slice(), &[0.1, 0.2]);
    }

    #[test]
    fn test_crisis_period_overlap() {
        let period = CrisisPeriod::new(10, 20).unwrap();
        assert_eq!(period.len(), 10);

        assert!(!period.overlaps(0, 10)); // ends exactly at start
        assert!(period.overlaps(0, 11));
        assert!(period.overlaps(19, 12));
        assert!(!period.overlaps(20, 12)); // starts exactly at end

        assert!(CrisisPeriod::new(5, 5).is_err());
        assert!(CrisisPeriod::new(6, 5).is_err());
    }

    #[test]
    fn test_bootstrap_config_defaults() {
        let config = BootstrapConfig::default();
        assert_eq!(config.block_length, 12);
        assert!((config.crisis_weight - 0.3).abs() < 1e-12);
        assert!(config.validate().is_ok());

        let bad = BootstrapConfig { crisis_weight: 1.5, ..Default::default() };
        assert!(bad.validate().is_err());
    }
}
