//! Year-by-year LTC projection for a single simulated lifetime

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::rng::RandomSource;

use super::config::LtcConfig;
use super::cost::annual_cost;
use super::hazard::{hazard_rate, Gender};
use super::state::CareState;

/// Default last projected age
pub const DEFAULT_MAX_AGE: u8 = 100;

/// Oldest age the engine will project to
pub const MAX_SUPPORTED_AGE: u8 = 120;

/// One projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtcYearProjection {
    pub age: u8,

    /// Onset hazard at this age
    pub onset_probability: f64,

    /// Care intensity in {0, 0.33, 0.66, 1.0}
    pub care_intensity: f64,

    /// Inflated cost of care this year
    pub annual_cost: f64,

    /// Running total of `annual_cost`
    pub cumulative_cost: f64,
}

/// LTC projection engine
///
/// Holds validated assumptions; every projection draws from a caller-owned
/// [`RandomSource`].
#[derive(Debug, Clone)]
pub struct LtcEngine {
    config: LtcConfig,
}

impl LtcEngine {
    /// Create an engine, validating the assumptions once
    pub fn new(config: LtcConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LtcConfig {
        &self.config
    }

    /// Project from `current_age` to `max_age` inclusive
    ///
    /// Each year runs the onset / progression state machine, then costs the
    /// resulting tier with inflation measured from `current_age`.
    pub fn project(
        &self,
        current_age: u8,
        gender: Gender,
        max_age: u8,
        rng: &mut RandomSource,
    ) -> Result<Vec<LtcYearProjection>> {
        check_age_range(current_age, max_age)?;

        let config = &self.config;
        let mut state = CareState::default();
        let mut cumulative_cost = 0.0;
        let mut projections = Vec::with_capacity((max_age - current_age) as usize + 1);

        for age in current_age..=max_age {
            let hazard = hazard_rate(age, config.base_hazard, config.age0, gender);
            state.advance(age, hazard, &config.intensity_dist, rng);

            let cost = annual_cost(
                state.intensity,
                &config.care_costs,
                config.inflation,
                (age - current_age) as u32,
            );
            cumulative_cost += cost;

            projections.push(LtcYearProjection {
                age,
                onset_probability: hazard,
                care_intensity: state.intensity.value(),
                annual_cost: cost,
                cumulative_cost,
            });
        }

        Ok(projections)
    }
}

pub(crate) fn check_age_range(current_age: u8, max_age: u8) -> Result<()> {
    if current_age > max_age || max_age > MAX_SUPPORTED_AGE {
        return Err(ConfigurationError::InvalidAgeRange { current_age, max_age });
    }
    Ok(())
}

/// Run one full-horizon projection with the given assumptions
pub fn generate_ltc_projections(
    config: &LtcConfig,
    current_age: u8,
    gender: Gender,
    max_age: u8,
    rng: &mut RandomSource,
) -> Result<Vec<LtcYearProjection>> {
    LtcEngine::new(config.clone())?.project(current_age, gender, max_age, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ltc::config::IntensityDistribution;
    use proptest::prelude::*;

    fn is_tier(value: f64) -> bool {
        [0.0, 0.33, 0.66, 1.0].iter().any(|t| (t - value).abs() < 1e-9)
    }

    #[test]
    fn test_projection_covers_inclusive_range() {
        let engine = LtcEngine::new(LtcConfig::default()).unwrap();
        let mut rng = RandomSource::new(1u64);
        let proj = engine.project(65, Gender::Female, DEFAULT_MAX_AGE, &mut rng).unwrap();

        assert_eq!(proj.len(), 36);
        assert_eq!(proj.first().map(|p| p.age), Some(65));
        assert_eq!(proj.last().map(|p| p.age), Some(100));
    }

    #[test]
    fn test_onset_probability_is_hazard() {
        let config = LtcConfig::default();
        let engine = LtcEngine::new(config.clone()).unwrap();
        let mut rng = RandomSource::new(1u64);
        let proj = engine.project(70, Gender::Male, 90, &mut rng).unwrap();
        for year in &proj {
            let expected = hazard_rate(year.age, config.base_hazard, config.age0, Gender::Male);
            assert_eq!(year.onset_probability, expected);
        }
    }

    #[test]
    fn test_severe_onset_costs() {
        // Hazard is capped at 0.4, so onset is near-certain over 21 years
        let config = LtcConfig {
            base_hazard: 1.0,
            intensity_dist: IntensityDistribution::new(vec![0.0, 0.0, 0.0, 1.0]).unwrap(),
            inflation: 0.0,
            ..Default::default()
        };
        let engine = LtcEngine::new(config.clone()).unwrap();
        let mut rng = RandomSource::new(4u64);
        let proj = engine.project(80, Gender::Male, 100, &mut rng).unwrap();

        let onset = proj.iter().position(|p| p.care_intensity > 0.0).unwrap();
        assert_eq!(proj[onset].care_intensity, 1.0);
        assert_eq!(proj[onset].annual_cost, config.care_costs.nursing_home);
        assert!(proj[onset..].iter().all(|p| p.care_intensity > 0.0));
        assert!(proj[..onset].iter().all(|p| p.annual_cost == 0.0));
    }

    #[test]
    fn test_no_hazard_means_no_cost() {
        let config = LtcConfig { base_hazard: 0.0, ..Default::default() };
        let mut rng = RandomSource::new(4u64);
        let proj = generate_ltc_projections(&config, 60, Gender::Female, 100, &mut rng).unwrap();
        assert!(proj.iter().all(|p| p.annual_cost == 0.0 && p.care_intensity == 0.0));
        assert_eq!(proj.last().map(|p| p.cumulative_cost), Some(0.0));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let config = LtcConfig { base_hazard: 0.05, ..Default::default() };
        let a = generate_ltc_projections(&config, 65, Gender::Female, 100, &mut RandomSource::new("x"))
            .unwrap();
        let b = generate_ltc_projections(&config, 65, Gender::Female, 100, &mut RandomSource::new("x"))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_age_range() {
        let engine = LtcEngine::new(LtcConfig::default()).unwrap();
        let mut rng = RandomSource::new(1u64);
        assert_eq!(
            engine.project(90, Gender::Male, 80, &mut rng),
            Err(ConfigurationError::InvalidAgeRange { current_age: 90, max_age: 80 })
        );
        assert!(engine.project(60, Gender::Male, 121, &mut rng).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LtcConfig { inflation: f64::NAN, ..Default::default() };
        assert!(LtcEngine::new(config).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_projection_invariants(
            seed in any::<u64>(),
            current_age in 50u8..95,
            base_hazard in 0.0f64..0.3,
            female in any::<bool>(),
        ) {
            let gender = if female { Gender::Female } else { Gender::Male };
            let config = LtcConfig { base_hazard, ..Default::default() };
            let mut rng = RandomSource::new(seed);
            let proj = generate_ltc_projections(&config, current_age, gender, 100, &mut rng).unwrap();

            let mut seen_care = false;
            for (i, year) in proj.iter().enumerate() {
                prop_assert!(is_tier(year.care_intensity));
                prop_assert!(year.onset_probability <= 0.4);
                if i > 0 {
                    prop_assert!(year.cumulative_cost >= proj[i - 1].cumulative_cost);
                }
                if seen_care {
                    prop_assert!(year.care_intensity > 0.0);
                }
                seen_care |= year.care_intensity > 0.0;
            }
        }
    }
}
