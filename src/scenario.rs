//! Scenario runner for batch simulations
//!
//! Pre-loads assumptions once, then runs bootstrap batches, sequence-risk
//! studies and LTC simulations against them without re-reading CSV files.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bootstrap::{
    generate_block_sequence, generate_crisis_stratified_sequence, generate_multi_asset_bootstrap,
    CrisisSamplingStats, CrisisStratifiedSequence, MultiAssetBootstrapResult,
};
use crate::error::{LoadError, Result};
use crate::ltc::{
    calculate_ltc_risk_present_value, Gender, LtcEngine, LtcScenarioSet, LtcSimulationResult,
};
use crate::rng::{RandomSource, Seed};
use crate::sequence::{analyze_sequence_risk, generate_sequence_scenarios, SequenceRiskResult};
use crate::Assumptions;

/// Fixed-withdrawal retirement plan analysed for sequence risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalPlan {
    /// Horizon in periods of the return history
    pub years: usize,

    /// Share of `initial_value` withdrawn every period
    pub withdrawal_rate: f64,

    pub initial_value: f64,
}

impl Default for WithdrawalPlan {
    fn default() -> Self {
        Self {
            years: 30,
            withdrawal_rate: 0.04,
            initial_value: 1_000_000.0,
        }
    }
}

/// Sequence-risk outcome of one named stress path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressScenarioResult {
    pub name: String,
    pub returns: Vec<f64>,
    pub result: SequenceRiskResult,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// // Same history, different plans
/// for rate in [0.035, 0.04, 0.045] {
///     let plan = WithdrawalPlan { withdrawal_rate: rate, ..Default::default() };
///     let results = runner.run_sequence_risk(&plan, 1_000, 42u64)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded base assumptions
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the built-in assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_planning(),
        }
    }

    /// Create runner by loading histories from CSV files
    pub fn from_csv() -> std::result::Result<Self, LoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from a specific history directory
    pub fn from_csv_path(path: &std::path::Path) -> std::result::Result<Self, LoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Correlated equity/bond/alternative paths
    pub fn run_multi_asset(
        &self,
        n_sequences: usize,
        target_length: usize,
        seed: impl Into<Seed>,
    ) -> Result<Vec<MultiAssetBootstrapResult>> {
        let a = &self.base_assumptions;
        generate_multi_asset_bootstrap(&a.histories, &a.bootstrap, n_sequences, target_length, seed)
    }

    /// Crisis-stratified equity paths, one random source per path
    pub fn run_crisis_stratified(
        &self,
        n_sequences: usize,
        target_length: usize,
        seed: impl Into<Seed>,
    ) -> Result<Vec<CrisisStratifiedSequence>> {
        let a = &self.base_assumptions;
        a.bootstrap.validate()?;
        let base_seed = seed.into().to_u64();

        let paths = (0..n_sequences)
            .into_par_iter()
            .map(|i| {
                let mut rng = RandomSource::for_unit(base_seed, i as u64);
                generate_crisis_stratified_sequence(
                    &a.histories.equity,
                    &a.crisis_periods,
                    target_length,
                    a.bootstrap.crisis_weight,
                    &mut rng,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let mut stats = CrisisSamplingStats::default();
        for path in &paths {
            stats.merge(&path.stats);
        }
        if stats.fallback_blocks > 0 {
            warn!(
                "{:.1}% of calm blocks fell back to unfiltered sampling",
                stats.fallback_rate() * 100.0
            );
        }
        info!(
            "Generated {} stratified paths ({} crisis / {} calm blocks)",
            paths.len(),
            stats.crisis_blocks,
            stats.normal_blocks + stats.fallback_blocks
        );
        Ok(paths)
    }

    /// Bootstrap equity paths and analyse each for sequence risk
    pub fn run_sequence_risk(
        &self,
        plan: &WithdrawalPlan,
        n_paths: usize,
        seed: impl Into<Seed>,
    ) -> Result<Vec<SequenceRiskResult>> {
        let a = &self.base_assumptions;
        a.bootstrap.validate()?;
        let base_seed = seed.into().to_u64();

        let results = (0..n_paths)
            .into_par_iter()
            .map(|i| {
                let mut rng = RandomSource::for_unit(base_seed, i as u64);
                let returns = generate_block_sequence(
                    &a.histories.equity,
                    plan.years,
                    a.bootstrap.block_length,
                    &mut rng,
                )?;
                analyze_sequence_risk(&returns, plan.withdrawal_rate, plan.initial_value)
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Analysed sequence risk on {} bootstrap paths", results.len());
        Ok(results)
    }

    /// Analyse the four deterministic stress orderings of the equity history
    pub fn run_stress_scenarios(&self, plan: &WithdrawalPlan) -> Result<Vec<StressScenarioResult>> {
        let equity = self.base_assumptions.histories.equity.as_slice();
        let scenarios = generate_sequence_scenarios(equity, plan.years)?;

        scenarios
            .named()
            .into_iter()
            .map(|(name, returns)| -> Result<StressScenarioResult> {
                let result = analyze_sequence_risk(returns, plan.withdrawal_rate, plan.initial_value)?;
                Ok(StressScenarioResult {
                    name: name.to_string(),
                    returns: returns.to_vec(),
                    result,
                })
            })
            .collect()
    }

    /// Monte Carlo over simulated lifetimes
    pub fn run_ltc(
        &self,
        current_age: u8,
        gender: Gender,
        max_age: u8,
        n_simulations: usize,
        seed: impl Into<Seed>,
    ) -> Result<Vec<LtcSimulationResult>> {
        self.ltc_engine()?
            .simulate(current_age, gender, max_age, n_simulations, seed)
    }

    /// Base projection and its stress variants
    pub fn run_ltc_scenarios(
        &self,
        current_age: u8,
        gender: Gender,
        max_age: u8,
        seed: impl Into<Seed>,
    ) -> Result<LtcScenarioSet> {
        let mut rng = RandomSource::new(seed);
        self.ltc_engine()?
            .event_scenarios(current_age, gender, max_age, &mut rng)
    }

    /// Present value of hazard-weighted care cost over one base projection
    pub fn ltc_present_value(
        &self,
        current_age: u8,
        gender: Gender,
        max_age: u8,
        discount_rate: f64,
        seed: impl Into<Seed>,
    ) -> Result<f64> {
        let mut rng = RandomSource::new(seed);
        let projection = self
            .ltc_engine()?
            .project(current_age, gender, max_age, &mut rng)?;
        calculate_ltc_risk_present_value(&projection, discount_rate, current_age)
    }

    fn ltc_engine(&self) -> Result<LtcEngine> {
        LtcEngine::new(self.base_assumptions.ltc.clone())
    }

    /// Get reference to base assumptions for inspection/modification
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
