//! Monte Carlo over simulated lifetimes

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rng::{RandomSource, Seed};
use crate::stats::{mean, percentile};

use super::config::LtcConfig;
use super::hazard::Gender;
use super::projection::{check_age_range, LtcEngine, LtcYearProjection};

/// Outcome of one simulated lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtcSimulationResult {
    /// First age with care intensity above zero, if any
    pub onset_age: Option<u8>,

    /// Care cost accumulated from onset to the end of the horizon
    pub total_cost: f64,

    pub peak_intensity: f64,

    /// Years spent with care intensity above zero
    pub duration_years: u32,
}

impl LtcSimulationResult {
    pub fn from_projection(projection: &[LtcYearProjection]) -> Self {
        let onset = projection.iter().position(|p| p.care_intensity > 0.0);

        let (total_cost, peak_intensity, duration_years) = match onset {
            Some(start) => projection[start..].iter().fold((0.0, 0.0_f64, 0u32), |acc, p| {
                let in_care = if p.care_intensity > 0.0 { 1 } else { 0 };
                (acc.0 + p.annual_cost, acc.1.max(p.care_intensity), acc.2 + in_care)
            }),
            None => (0.0, 0.0, 0),
        };

        Self {
            onset_age: onset.map(|i| projection[i].age),
            total_cost,
            peak_intensity,
            duration_years,
        }
    }

    pub fn had_care(&self) -> bool {
        self.onset_age.is_some()
    }
}

impl LtcEngine {
    /// Run `n_simulations` independent lifetimes in parallel
    ///
    /// Lifetime `i` draws from `RandomSource::for_unit(seed, i)`.
    pub fn simulate(
        &self,
        current_age: u8,
        gender: Gender,
        max_age: u8,
        n_simulations: usize,
        seed: impl Into<Seed>,
    ) -> Result<Vec<LtcSimulationResult>> {
        check_age_range(current_age, max_age)?;

        let base_seed = seed.into().to_u64();
        debug!(
            "Simulating {} LTC lifetimes from age {} to {} ({})",
            n_simulations, current_age, max_age, gender
        );

        let results = (0..n_simulations)
            .into_par_iter()
            .map(|i| {
                let mut rng = RandomSource::for_unit(base_seed, i as u64);
                self.project(current_age, gender, max_age, &mut rng)
                    .map(|projection| LtcSimulationResult::from_projection(&projection))
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Completed {} LTC simulations", results.len());
        Ok(results)
    }
}

/// Run `n_simulations` lifetimes with the given assumptions
pub fn simulate_ltc_events(
    config: &LtcConfig,
    current_age: u8,
    gender: Gender,
    max_age: u8,
    n_simulations: usize,
    seed: impl Into<Seed>,
) -> Result<Vec<LtcSimulationResult>> {
    LtcEngine::new(config.clone())?.simulate(current_age, gender, max_age, n_simulations, seed)
}

/// Aggregate view over many simulated lifetimes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtcSimulationSummary {
    pub simulations: usize,

    /// Share of lifetimes that needed care
    pub probability_of_care: f64,

    /// Mean total cost over all lifetimes, including those without care
    pub expected_cost: f64,

    /// Mean total cost over lifetimes that needed care
    pub mean_cost_given_care: Option<f64>,

    /// 90th percentile of total cost
    pub p90_cost: f64,

    pub mean_onset_age: Option<f64>,
    pub mean_duration_years: Option<f64>,
    pub mean_peak_intensity: Option<f64>,
}

/// Summarize a batch of lifetimes; `None` for an empty batch
pub fn summarize_ltc_simulations(results: &[LtcSimulationResult]) -> Option<LtcSimulationSummary> {
    if results.is_empty() {
        return None;
    }

    let costs: Vec<f64> = results.iter().map(|r| r.total_cost).collect();
    let with_care: Vec<&LtcSimulationResult> = results.iter().filter(|r| r.had_care()).collect();
    let care_costs: Vec<f64> = with_care.iter().map(|r| r.total_cost).collect();
    let onset_ages: Vec<f64> = with_care
        .iter()
        .filter_map(|r| r.onset_age.map(f64::from))
        .collect();
    let durations: Vec<f64> = with_care.iter().map(|r| r.duration_years as f64).collect();
    let peaks: Vec<f64> = with_care.iter().map(|r| r.peak_intensity).collect();

    Some(LtcSimulationSummary {
        simulations: results.len(),
        probability_of_care: with_care.len() as f64 / results.len() as f64,
        expected_cost: mean(&costs).unwrap_or(0.0),
        mean_cost_given_care: mean(&care_costs),
        p90_cost: percentile(&costs, 0.9).unwrap_or(0.0),
        mean_onset_age: mean(&onset_ages),
        mean_duration_years: mean(&durations),
        mean_peak_intensity: mean(&peaks),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(age: u8, care_intensity: f64, annual_cost: f64) -> LtcYearProjection {
        LtcYearProjection {
            age,
            onset_probability: 0.1,
            care_intensity,
            annual_cost,
            cumulative_cost: 0.0,
        }
    }

    #[test]
    fn test_result_from_projection() {
        let projection = vec![
            year(70, 0.0, 0.0),
            year(71, 0.33, 100.0),
            year(72, 1.0, 300.0),
            year(73, 0.66, 200.0),
        ];
        let result = LtcSimulationResult::from_projection(&projection);
        assert_eq!(result.onset_age, Some(71));
        assert_eq!(result.total_cost, 600.0);
        assert_eq!(result.peak_intensity, 1.0);
        assert_eq!(result.duration_years, 3);
    }

    #[test]
    fn test_result_without_care() {
        let projection = vec![year(70, 0.0, 0.0), year(71, 0.0, 0.0)];
        let result = LtcSimulationResult::from_projection(&projection);
        assert_eq!(result.onset_age, None);
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.duration_years, 0);
        assert!(!result.had_care());
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let config = LtcConfig::default();
        let a = simulate_ltc_events(&config, 65, Gender::Female, 100, 200, "household-1").unwrap();
        let b = simulate_ltc_events(&config, 65, Gender::Female, 100, 200, "household-1").unwrap();
        assert_eq!(a.len(), 200);
        assert_eq!(a, b);
    }

    #[test]
    fn test_simulated_lifetimes_are_independent() {
        let config = LtcConfig { base_hazard: 0.03, ..Default::default() };
        let results = simulate_ltc_events(&config, 65, Gender::Male, 100, 200, 1u64).unwrap();
        let first = &results[0];
        assert!(results.iter().any(|r| r != first));
    }

    #[test]
    fn test_simulation_consistency() {
        let config = LtcConfig::default();
        let results = simulate_ltc_events(&config, 65, Gender::Female, 100, 500, 21u64).unwrap();
        for r in &results {
            match r.onset_age {
                Some(age) => {
                    assert!((65..=100).contains(&age));
                    assert!(r.duration_years >= 1);
                    assert!(r.duration_years as u8 <= 100 - age + 1);
                    assert!(r.peak_intensity > 0.0);
                }
                None => assert_eq!(r.total_cost, 0.0),
            }
        }
    }

    #[test]
    fn test_zero_hazard_summary() {
        let config = LtcConfig { base_hazard: 0.0, ..Default::default() };
        let results = simulate_ltc_events(&config, 65, Gender::Male, 100, 50, 2u64).unwrap();
        let summary = summarize_ltc_simulations(&results).unwrap();
        assert_eq!(summary.simulations, 50);
        assert_eq!(summary.probability_of_care, 0.0);
        assert_eq!(summary.expected_cost, 0.0);
        assert_eq!(summary.mean_cost_given_care, None);
        assert_eq!(summary.mean_onset_age, None);
    }

    #[test]
    fn test_summary_statistics() {
        let results = vec![
            LtcSimulationResult {
                onset_age: Some(80),
                total_cost: 400.0,
                peak_intensity: 1.0,
                duration_years: 4,
            },
            LtcSimulationResult {
                onset_age: None,
                total_cost: 0.0,
                peak_intensity: 0.0,
                duration_years: 0,
            },
        ];
        let summary = summarize_ltc_simulations(&results).unwrap();
        assert_eq!(summary.probability_of_care, 0.5);
        assert_eq!(summary.expected_cost, 200.0);
        assert_eq!(summary.mean_cost_given_care, Some(400.0));
        assert_eq!(summary.mean_onset_age, Some(80.0));
        assert_eq!(summary.mean_duration_years, Some(4.0));
        assert_eq!(summary.mean_peak_intensity, Some(1.0));
        assert!(summarize_ltc_simulations(&[]).is_none());
    }

    #[test]
    fn test_invalid_age_range() {
        let config = LtcConfig::default();
        assert!(simulate_ltc_events(&config, 90, Gender::Male, 70, 10, 1u64).is_err());
    }
}
