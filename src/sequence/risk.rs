//! Sequence-of-returns depletion analysis

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::stats::percentile;

/// Outcome of running one withdrawal plan over one return path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRiskResult {
    /// Portfolio value after the last simulated year (0 when depleted)
    pub final_value: f64,

    /// Year index at which a withdrawal exhausted the portfolio
    pub time_to_depletion: Option<usize>,

    /// Largest peak-to-trough decline as a fraction of the peak
    pub max_drawdown: f64,

    /// Withdrawals taken, including the one that depleted the portfolio
    pub withdrawals_sustained: usize,
}

impl SequenceRiskResult {
    pub fn depleted(&self) -> bool {
        self.time_to_depletion.is_some()
    }
}

/// Simulate fixed annual withdrawals against a return path
///
/// The withdrawal `initial_value * withdrawal_rate` is taken at the start of
/// every year and is not indexed to inflation, so the result isolates the
/// effect of return ordering. The year's return is applied to what remains.
/// A withdrawal that leaves the portfolio at or below zero ends the run.
///
/// # Errors
/// `InvalidParameter` for a non-positive initial value or a negative
/// withdrawal rate or a return below -100%; `NonFiniteValue` for NaN/inf
/// returns.
pub fn analyze_sequence_risk(
    returns: &[f64],
    withdrawal_rate: f64,
    initial_value: f64,
) -> Result<SequenceRiskResult> {
    if !(initial_value.is_finite() && initial_value > 0.0) {
        return Err(ConfigurationError::InvalidParameter {
            name: "initial_value",
            value: initial_value,
        });
    }
    if !(withdrawal_rate.is_finite() && withdrawal_rate >= 0.0) {
        return Err(ConfigurationError::InvalidParameter {
            name: "withdrawal_rate",
            value: withdrawal_rate,
        });
    }
    ConfigurationError::check_finite("returns", returns)?;
    if let Some(&r) = returns.iter().find(|&&r| r < -1.0) {
        return Err(ConfigurationError::InvalidParameter {
            name: "returns",
            value: r,
        });
    }

    let annual_withdrawal = initial_value * withdrawal_rate;
    let mut value = initial_value;
    let mut peak = initial_value;
    let mut max_drawdown: f64 = 0.0;
    let mut time_to_depletion = None;
    let mut withdrawals_sustained = 0;

    for (year, &r) in returns.iter().enumerate() {
        value -= annual_withdrawal;
        withdrawals_sustained += 1;

        if value <= 0.0 {
            value = 0.0;
            time_to_depletion = Some(year);
            break;
        }

        value *= 1.0 + r;

        peak = peak.max(value);
        if peak > 0.0 {
            max_drawdown = max_drawdown.max((peak - value) / peak);
        }
    }

    Ok(SequenceRiskResult {
        final_value: value.max(0.0),
        time_to_depletion,
        max_drawdown,
        withdrawals_sustained,
    })
}

/// Aggregate view over many sequence-risk runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRiskSummary {
    pub paths: usize,
    /// Share of paths that never depleted
    pub success_rate: f64,
    pub mean_final_value: f64,
    pub median_final_value: f64,
    /// 10th percentile of final value
    pub p10_final_value: f64,
    pub mean_max_drawdown: f64,
    pub worst_max_drawdown: f64,
    /// Median depletion year over the depleted paths only
    pub median_depletion_year: Option<f64>,
}

/// Summarize a batch of results; `None` for an empty batch
pub fn summarize_sequence_risk(results: &[SequenceRiskResult]) -> Option<SequenceRiskSummary> {
    if results.is_empty() {
        return None;
    }
    let n = results.len() as f64;

    let finals: Vec<f64> = results.iter().map(|r| r.final_value).collect();
    let depletion_years: Vec<f64> = results
        .iter()
        .filter_map(|r| r.time_to_depletion.map(|y| y as f64))
        .collect();
    let survivors = results.len() - depletion_years.len();

    Some(SequenceRiskSummary {
        paths: results.len(),
        success_rate: survivors as f64 / n,
        mean_final_value: finals.iter().sum::<f64>() / n,
        median_final_value: percentile(&finals, 0.5).unwrap_or(0.0),
        p10_final_value: percentile(&finals, 0.1).unwrap_or(0.0),
        mean_max_drawdown: results.iter().map(|r| r.max_drawdown).sum::<f64>() / n,
        worst_max_drawdown: results.iter().map(|r| r.max_drawdown).fold(0.0, f64::max),
        median_depletion_year: percentile(&depletion_years, 0.5),
    })
}
