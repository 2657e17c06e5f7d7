//! Retirement Risk - Monte Carlo scenario generation and risk scoring for retirement plans
//!
//! This library provides:
//! - Block bootstrap resampling of historical returns (single asset, correlated
//!   multi-asset and crisis-stratified)
//! - Deterministic sequence-of-returns stress paths and depletion analysis
//! - Long-term-care onset, progression and cost projections
//! - LTC stress scenarios, insurance benefit and present-value valuation
//! - Parallel Monte Carlo batches with per-unit reproducible seeding

pub mod error;
pub mod rng;
pub mod stats;
pub mod bootstrap;
pub mod sequence;
pub mod ltc;
pub mod assumptions;
pub mod scenario;

// Re-export commonly used types
pub use error::{ConfigurationError, LoadError};
pub use rng::{RandomSource, Seed};
pub use assumptions::Assumptions;
pub use bootstrap::{AssetHistories, BootstrapConfig, CrisisPeriod, ReturnSeries};
pub use sequence::{analyze_sequence_risk, SequenceRiskResult};
pub use ltc::{Gender, LtcConfig, LtcEngine, LtcYearProjection};
pub use scenario::{ScenarioRunner, WithdrawalPlan};
