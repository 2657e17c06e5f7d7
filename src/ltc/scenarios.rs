//! Named LTC stress variants derived from a base projection

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rng::RandomSource;

use super::config::LtcConfig;
use super::cost::annual_cost;
use super::hazard::Gender;
use super::projection::{LtcEngine, LtcYearProjection};
use super::state::CareIntensity;

/// Age from which the severe-need variant forces full-intensity care
pub const SEVERE_NEED_AGE: u8 = 75;

/// Age from which the spouse-need variant scales costs
pub const SPOUSE_NEED_AGE: u8 = 80;

/// Cost multiplier for a second person needing care
pub const SPOUSE_COST_MULTIPLIER: f64 = 1.8;

/// Onset hazard multiplier for the early-onset variant
pub const EARLY_ONSET_HAZARD_MULTIPLIER: f64 = 3.0;

/// Base projection plus four stress variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtcScenarioSet {
    pub base: Vec<LtcYearProjection>,
    pub no_ltc: Vec<LtcYearProjection>,
    pub early_onset: Vec<LtcYearProjection>,
    pub severe_need: Vec<LtcYearProjection>,
    pub spouse_need: Vec<LtcYearProjection>,
}

impl LtcScenarioSet {
    /// Variants keyed by scenario name, base first
    pub fn named(&self) -> [(&'static str, &[LtcYearProjection]); 5] {
        [
            ("base", &self.base),
            ("no_ltc", &self.no_ltc),
            ("early_onset", &self.early_onset),
            ("severe_need", &self.severe_need),
            ("spouse_need", &self.spouse_need),
        ]
    }
}

impl LtcEngine {
    /// Project once and derive every stress variant from that projection
    ///
    /// The early-onset variant is a second projection with the base hazard
    /// tripled, drawing from the same `rng` after the base run.
    pub fn event_scenarios(
        &self,
        current_age: u8,
        gender: Gender,
        max_age: u8,
        rng: &mut RandomSource,
    ) -> Result<LtcScenarioSet> {
        let base = self.project(current_age, gender, max_age, rng)?;

        let early_engine =
            LtcEngine::new(self.config().with_hazard_multiplier(EARLY_ONSET_HAZARD_MULTIPLIER))?;
        let early_onset = early_engine.project(current_age, gender, max_age, rng)?;

        Ok(LtcScenarioSet {
            no_ltc: no_ltc(&base),
            severe_need: severe_need(&base, self.config(), current_age),
            spouse_need: spouse_need(&base),
            early_onset,
            base,
        })
    }
}

/// Project and derive the scenario set with the given assumptions
pub fn generate_ltc_event_scenarios(
    config: &LtcConfig,
    current_age: u8,
    gender: Gender,
    max_age: u8,
    rng: &mut RandomSource,
) -> Result<LtcScenarioSet> {
    LtcEngine::new(config.clone())?.event_scenarios(current_age, gender, max_age, rng)
}

fn no_ltc(base: &[LtcYearProjection]) -> Vec<LtcYearProjection> {
    base.iter()
        .map(|p| LtcYearProjection {
            care_intensity: 0.0,
            annual_cost: 0.0,
            cumulative_cost: 0.0,
            ..p.clone()
        })
        .collect()
}

fn severe_need(
    base: &[LtcYearProjection],
    config: &LtcConfig,
    current_age: u8,
) -> Vec<LtcYearProjection> {
    let mut cumulative_cost = 0.0;
    base.iter()
        .map(|p| {
            let mut year = p.clone();
            if p.age >= SEVERE_NEED_AGE {
                year.care_intensity = CareIntensity::Severe.value();
                year.annual_cost = annual_cost(
                    CareIntensity::Severe,
                    &config.care_costs,
                    config.inflation,
                    (p.age - current_age) as u32,
                );
            }
            cumulative_cost += year.annual_cost;
            year.cumulative_cost = cumulative_cost;
            year
        })
        .collect()
}

fn spouse_need(base: &[LtcYearProjection]) -> Vec<LtcYearProjection> {
    base.iter()
        .map(|p| {
            if p.age >= SPOUSE_NEED_AGE {
                LtcYearProjection {
                    annual_cost: p.annual_cost * SPOUSE_COST_MULTIPLIER,
                    cumulative_cost: p.cumulative_cost * SPOUSE_COST_MULTIPLIER,
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect()
}
