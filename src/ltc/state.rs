//! Care-intensity state machine
//!
//! States are {none, mild, moderate, severe}. A run leaves `None` through
//! the onset hazard and never returns: once care has begun, improvement can
//! lower intensity only as far as mild. Active tiers move up or down one step
//! per year; there is no terminal state.

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

use super::config::IntensityDistribution;

/// Fixed annual probability of improving by one tier
pub const IMPROVEMENT_PROBABILITY: f64 = 0.03;

/// Quantized level of long-term-care need
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CareIntensity {
    #[default]
    None = 0,
    Mild = 1,
    Moderate = 2,
    Severe = 3,
}

impl CareIntensity {
    pub const TIERS: [CareIntensity; 4] = [
        CareIntensity::None,
        CareIntensity::Mild,
        CareIntensity::Moderate,
        CareIntensity::Severe,
    ];

    /// Numeric intensity reported in projections
    pub fn value(self) -> f64 {
        match self {
            CareIntensity::None => 0.0,
            CareIntensity::Mild => 0.33,
            CareIntensity::Moderate => 0.66,
            CareIntensity::Severe => 1.0,
        }
    }

    /// Nearest tier to an intensity in [0, 1]
    pub fn from_value(value: f64) -> Self {
        Self::TIERS
            .into_iter()
            .min_by(|a, b| (a.value() - value).abs().total_cmp(&(b.value() - value).abs()))
            .unwrap_or(CareIntensity::None)
    }

    pub fn is_active(self) -> bool {
        self != CareIntensity::None
    }

    /// One tier more intense, capped at severe
    pub fn step_up(self) -> Self {
        match self {
            CareIntensity::None => CareIntensity::Mild,
            CareIntensity::Mild => CareIntensity::Moderate,
            CareIntensity::Moderate | CareIntensity::Severe => CareIntensity::Severe,
        }
    }

    /// One tier less intense, floored at mild for active care
    pub fn step_down(self) -> Self {
        match self {
            CareIntensity::None => CareIntensity::None,
            CareIntensity::Mild | CareIntensity::Moderate => CareIntensity::Mild,
            CareIntensity::Severe => CareIntensity::Moderate,
        }
    }
}

/// Annual probability of worsening by one tier, rising with age
pub fn progression_probability(age: u8) -> f64 {
    (0.05 + (age as f64 - 65.0) * 0.002).clamp(0.0, 1.0)
}

/// Year-to-year state of one simulated lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CareState {
    /// Onset latch; never resets within a run
    pub has_need: bool,
    pub intensity: CareIntensity,
}

impl CareState {
    /// Advance one year at `age`
    ///
    /// Before onset a single draw against `hazard` decides onset, followed by
    /// a tier draw on success. After onset a single draw decides progression
    /// (below the age-based progression probability), improvement (below
    /// progression plus [`IMPROVEMENT_PROBABILITY`]) or no change. The onset
    /// year itself does not also progress.
    pub fn advance(
        &mut self,
        age: u8,
        hazard: f64,
        intensity_dist: &IntensityDistribution,
        rng: &mut RandomSource,
    ) {
        if !self.has_need {
            if rng.next() < hazard {
                self.has_need = true;
                self.intensity = intensity_dist.sample(rng);
            }
            return;
        }

        let progression = progression_probability(age);
        let u = rng.next();
        if u < progression {
            self.intensity = self.intensity.step_up();
        } else if u < progression + IMPROVEMENT_PROBABILITY {
            self.intensity = self.intensity.step_down();
        }
    }
}
