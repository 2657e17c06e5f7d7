//! Deterministic stress paths built by reordering historical returns
//!
//! None of these draw random numbers: the same inputs always give the same
//! four paths.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// Crash-then-recovery returns written over years 0-2 of the recovery path
pub const RECOVERY_SHOCK: [f64; 3] = [-0.35, 0.25, 0.15];

/// Four patterned stress paths of equal length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceScenarios {
    /// Best returns first
    pub favorable: Vec<f64>,
    /// Worst returns first (reverse of `favorable`)
    pub unfavorable: Vec<f64>,
    /// Alternates between the strong and weak halves of history
    pub volatile: Vec<f64>,
    /// History with a fixed crash and rebound in the first three years
    pub recovery: Vec<f64>,
}

impl SequenceScenarios {
    /// Paths paired with their names, in a fixed order
    pub fn named(&self) -> [(&'static str, &[f64]); 4] {
        [
            ("favorable", &self.favorable),
            ("unfavorable", &self.unfavorable),
            ("volatile", &self.volatile),
            ("recovery", &self.recovery),
        ]
    }
}

/// Build the favorable, unfavorable, volatile and recovery paths
///
/// When `n_years` exceeds the history length the underlying ordering is
/// cycled, so every path has exactly `n_years` entries.
///
/// # Errors
/// `EmptySeries` when `base_returns` is empty, `NonFiniteValue` on NaN/inf.
pub fn generate_sequence_scenarios(base_returns: &[f64], n_years: usize) -> Result<SequenceScenarios> {
    if base_returns.is_empty() {
        return Err(ConfigurationError::EmptySeries);
    }
    ConfigurationError::check_finite("base returns", base_returns)?;

    let mut sorted = base_returns.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let favorable = cycle_to(&sorted, n_years);

    let mut unfavorable = favorable.clone();
    unfavorable.reverse();

    // Top half gets the extra element on odd lengths so it is never empty
    let (top, bottom) = sorted.split_at(sorted.len().div_ceil(2));
    let volatile = (0..n_years)
        .map(|year| {
            let half = if year % 2 == 0 || bottom.is_empty() { top } else { bottom };
            half[(year / 2) % half.len()]
        })
        .collect();

    let mut recovery = cycle_to(base_returns, n_years);
    for (slot, shock) in recovery.iter_mut().zip(RECOVERY_SHOCK) {
        *slot = shock;
    }

    Ok(SequenceScenarios { favorable, unfavorable, volatile, recovery })
}

fn cycle_to(values: &[f64], n: usize) -> Vec<f64> {
    values.iter().copied().cycle().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY: [f64; 6] = [0.05, -0.12, 0.21, 0.08, -0.03, 0.15];

    #[test]
    fn test_favorable_and_unfavorable() {
        let s = generate_sequence_scenarios(&HISTORY, 4).unwrap();
        assert_eq!(s.favorable, vec![0.21, 0.15, 0.08, 0.05]);
        assert_eq!(s.unfavorable, vec![0.05, 0.08, 0.15, 0.21]);
    }

    #[test]
    fn test_unfavorable_is_exact_reverse() {
        let s = generate_sequence_scenarios(&HISTORY, 6).unwrap();
        let mut reversed = s.favorable.clone();
        reversed.reverse();
        assert_eq!(s.unfavorable, reversed);
        assert_eq!(s.unfavorable[0], -0.12);
    }

    #[test]
    fn test_volatile_alternates_halves() {
        // sorted: [0.21, 0.15, 0.08 | 0.05, -0.03, -0.12]
        let s = generate_sequence_scenarios(&HISTORY, 8).unwrap();
        assert_eq!(s.volatile, vec![0.21, 0.05, 0.15, -0.03, 0.08, -0.12, 0.21, 0.05]);
    }

    #[test]
    fn test_volatile_single_return() {
        let s = generate_sequence_scenarios(&[0.04], 3).unwrap();
        assert_eq!(s.volatile, vec![0.04, 0.04, 0.04]);
    }

    #[test]
    fn test_recovery_shock_overrides_history() {
        let s = generate_sequence_scenarios(&HISTORY, 5).unwrap();
        assert_eq!(&s.recovery[..3], &[-0.35, 0.25, 0.15]);
        assert_eq!(&s.recovery[3..], &[0.08, -0.03]);

        let other = generate_sequence_scenarios(&[0.9, 0.9, 0.9, 0.9, 0.9], 5).unwrap();
        assert_eq!(&other.recovery[..3], &RECOVERY_SHOCK);
    }

    #[test]
    fn test_short_horizon_truncates_shock() {
        let s = generate_sequence_scenarios(&HISTORY, 2).unwrap();
        assert_eq!(s.recovery, vec![-0.35, 0.25]);
    }

    #[test]
    fn test_paths_cycle_past_history() {
        let s = generate_sequence_scenarios(&HISTORY, 15).unwrap();
        for (_, path) in s.named() {
            assert_eq!(path.len(), 15);
        }
        assert_eq!(s.favorable[6], 0.21);
    }

    #[test]
    fn test_deterministic() {
        let a = generate_sequence_scenarios(&HISTORY, 30).unwrap();
        let b = generate_sequence_scenarios(&HISTORY, 30).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_history_rejected() {
        assert_eq!(generate_sequence_scenarios(&[], 5), Err(ConfigurationError::EmptySeries));
    }
}
