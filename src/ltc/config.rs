//! Long-term-care assumptions: hazard parameters, intensity mix and care costs

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::rng::RandomSource;

use super::state::CareIntensity;

/// Tolerance on the sum of an intensity distribution
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Probability of each care-intensity tier at onset
///
/// Tier `i` of `k` maps to intensity `i / (k - 1)`, quantized to the nearest
/// [`CareIntensity`]. Four tiers (none, mild, moderate, severe) map exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct IntensityDistribution {
    probabilities: Vec<f64>,
}

impl IntensityDistribution {
    /// Strict constructor: probabilities must sum to 1
    pub fn new(probabilities: Vec<f64>) -> Result<Self> {
        Self::check_tiers(&probabilities)?;
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(ConfigurationError::UnnormalizedDistribution { sum });
        }
        Ok(Self { probabilities })
    }

    /// Accept a distribution that does not sum to 1, with a warning
    ///
    /// When the cumulative probability never exceeds a draw, sampling falls
    /// back to the severe tier.
    pub fn lenient(probabilities: Vec<f64>) -> Result<Self> {
        Self::check_tiers(&probabilities)?;
        let sum: f64 = probabilities.iter().sum();
        if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            warn!(
                "Intensity distribution sums to {:.6}; unmatched draws default to severe care",
                sum
            );
        }
        Ok(Self { probabilities })
    }

    fn check_tiers(probabilities: &[f64]) -> Result<()> {
        if probabilities.len() < 2 {
            return Err(ConfigurationError::InvalidDistribution {
                min: 2,
                got: probabilities.len(),
            });
        }
        for &p in probabilities {
            ConfigurationError::check_probability("intensity probability", p)?;
        }
        Ok(())
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn sum(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Draw an initial care tier
    ///
    /// Returns the tier at the first index whose cumulative probability
    /// exceeds a fresh uniform draw, or severe when none does.
    pub fn sample(&self, rng: &mut RandomSource) -> CareIntensity {
        let u = rng.next();
        let top = (self.probabilities.len() - 1) as f64;

        let mut cumulative = 0.0;
        for (i, p) in self.probabilities.iter().enumerate() {
            cumulative += p;
            if cumulative > u {
                return CareIntensity::from_value(i as f64 / top);
            }
        }
        CareIntensity::Severe
    }
}

impl Default for IntensityDistribution {
    /// Onset mix for (none, mild, moderate, severe)
    fn default() -> Self {
        Self {
            probabilities: vec![0.0, 0.40, 0.35, 0.25],
        }
    }
}

impl TryFrom<Vec<f64>> for IntensityDistribution {
    type Error = ConfigurationError;

    fn try_from(probabilities: Vec<f64>) -> Result<Self> {
        Self::new(probabilities)
    }
}

impl From<IntensityDistribution> for Vec<f64> {
    fn from(dist: IntensityDistribution) -> Self {
        dist.probabilities
    }
}

/// Annual base costs of care in 2024 dollars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareCosts {
    pub home_health: f64,
    pub adult_day_care: f64,
    pub assisted_living: f64,
    pub nursing_home: f64,
}

impl Default for CareCosts {
    fn default() -> Self {
        Self {
            home_health: 75_504.0,
            adult_day_care: 26_000.0,
            assisted_living: 64_200.0,
            nursing_home: 116_800.0,
        }
    }
}

impl CareCosts {
    /// Mild care blends 30% home health with 70% adult day care
    pub fn mild(&self) -> f64 {
        0.3 * self.home_health + 0.7 * self.adult_day_care
    }

    /// Uninflated annual cost of a tier
    pub fn base_cost(&self, intensity: CareIntensity) -> f64 {
        match intensity {
            CareIntensity::None => 0.0,
            CareIntensity::Mild => self.mild(),
            CareIntensity::Moderate => self.assisted_living,
            CareIntensity::Severe => self.nursing_home,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("home_health", self.home_health),
            ("adult_day_care", self.adult_day_care),
            ("assisted_living", self.assisted_living),
            ("nursing_home", self.nursing_home),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigurationError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Parameters of the LTC hazard and cost model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LtcConfig {
    /// Annual onset probability at `age0` for a male
    pub base_hazard: f64,

    /// Reference age of `base_hazard`
    pub age0: u8,

    /// Annual care-cost inflation
    pub inflation: f64,

    /// Tier mix at onset
    pub intensity_dist: IntensityDistribution,

    /// Base costs per tier
    pub care_costs: CareCosts,
}

impl Default for LtcConfig {
    fn default() -> Self {
        Self {
            base_hazard: 0.01,
            age0: 65,
            inflation: 0.03,
            intensity_dist: IntensityDistribution::default(),
            care_costs: CareCosts::default(),
        }
    }
}

impl LtcConfig {
    pub fn validate(&self) -> Result<()> {
        ConfigurationError::check_probability("base_hazard", self.base_hazard)?;
        ConfigurationError::check_rate("inflation", self.inflation)?;
        self.care_costs.validate()
    }

    /// Copy with the base hazard scaled, clamped to a valid probability
    pub fn with_hazard_multiplier(&self, multiplier: f64) -> Self {
        Self {
            base_hazard: (self.base_hazard * multiplier).clamp(0.0, 1.0),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_distribution_rejects_unnormalized() {
        assert!(IntensityDistribution::new(vec![0.0, 0.5, 0.5, 0.0]).is_ok());
        assert!(matches!(
            IntensityDistribution::new(vec![0.0, 0.3, 0.3, 0.2]),
            Err(ConfigurationError::UnnormalizedDistribution { .. })
        ));
        assert!(matches!(
            IntensityDistribution::new(vec![1.0]),
            Err(ConfigurationError::InvalidDistribution { min: 2, got: 1 })
        ));
        assert!(IntensityDistribution::new(vec![-0.5, 1.5]).is_err());
    }

    #[test]
    fn test_lenient_distribution_falls_back_to_severe() {
        // Nothing ever crosses a draw, so every sample is severe
        let dist = IntensityDistribution::lenient(vec![0.0, 0.0, 0.0, 0.0]).unwrap();
        let mut rng = RandomSource::new(5u64);
        for _ in 0..200 {
            assert_eq!(dist.sample(&mut rng), CareIntensity::Severe);
        }
    }

    #[test]
    fn test_sample_follows_cumulative_probability() {
        let dist = IntensityDistribution::new(vec![0.0, 1.0, 0.0, 0.0]).unwrap();
        let mut rng = RandomSource::new(1u64);
        assert_eq!(dist.sample(&mut rng), CareIntensity::Mild);

        let dist = IntensityDistribution::new(vec![0.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(dist.sample(&mut rng), CareIntensity::Severe);
    }

    #[test]
    fn test_sample_frequencies() {
        let dist = IntensityDistribution::default();
        let mut rng = RandomSource::new(77u64);
        let n = 20_000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            counts[dist.sample(&mut rng) as usize] += 1;
        }
        assert_eq!(counts[0], 0);
        let mild = counts[1] as f64 / n as f64;
        let severe = counts[3] as f64 / n as f64;
        assert!((mild - 0.40).abs() < 0.02, "mild share {}", mild);
        assert!((severe - 0.25).abs() < 0.02, "severe share {}", severe);
    }

    #[test]
    fn test_two_tier_distribution_maps_to_extremes() {
        let dist = IntensityDistribution::new(vec![0.0, 1.0]).unwrap();
        let mut rng = RandomSource::new(3u64);
        assert_eq!(dist.sample(&mut rng), CareIntensity::Severe);
    }

    #[test]
    fn test_mild_cost_blend() {
        let costs = CareCosts {
            home_health: 100.0,
            adult_day_care: 10.0,
            assisted_living: 50.0,
            nursing_home: 200.0,
        };
        assert!((costs.mild() - 37.0).abs() < 1e-12);
        assert_eq!(costs.base_cost(CareIntensity::None), 0.0);
        assert_eq!(costs.base_cost(CareIntensity::Severe), 200.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(LtcConfig::default().validate().is_ok());

        let bad = LtcConfig { base_hazard: 1.2, ..Default::default() };
        assert!(bad.validate().is_err());

        let tripled = LtcConfig { base_hazard: 0.5, ..Default::default() }.with_hazard_multiplier(3.0);
        assert_eq!(tripled.base_hazard, 1.0);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: LtcConfig =
            serde_json::from_str(r#"{"base_hazard": 0.02, "intensity_dist": [0.1, 0.2, 0.3, 0.4]}"#)
                .unwrap();
        assert_eq!(config.base_hazard, 0.02);
        assert_eq!(config.age0, 65);
        assert_eq!(config.intensity_dist.probabilities(), &[0.1, 0.2, 0.3, 0.4]);

        let bad: std::result::Result<LtcConfig, _> =
            serde_json::from_str(r#"{"intensity_dist": [0.1, 0.1]}"#);
        assert!(bad.is_err());
    }
}
