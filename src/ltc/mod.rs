//! Long-term-care risk engine
//!
//! Onset hazard, care-intensity state machine and cost model composed into a
//! year-by-year projection, plus stress variants, valuation and Monte Carlo.

pub mod config;
pub mod cost;
pub mod discount;
pub mod hazard;
pub mod projection;
pub mod scenarios;
pub mod simulation;
pub mod state;
pub mod valuation;

pub use config::{CareCosts, IntensityDistribution, LtcConfig};
pub use cost::{annual_cost, cost_tier};
pub use discount::DiscountCurve;
pub use hazard::{hazard_rate, Gender};
pub use projection::{generate_ltc_projections, LtcEngine, LtcYearProjection, DEFAULT_MAX_AGE};
pub use scenarios::{generate_ltc_event_scenarios, LtcScenarioSet};
pub use simulation::{
    simulate_ltc_events, summarize_ltc_simulations, LtcSimulationResult, LtcSimulationSummary,
};
pub use state::{progression_probability, CareIntensity, CareState};
pub use valuation::{
    calculate_ltc_insurance_benefit, calculate_ltc_risk_present_value, LtcInsuranceCoverage,
};
