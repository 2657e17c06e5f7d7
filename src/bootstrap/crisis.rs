//! Crisis-stratified block bootstrap
//!
//! Each block is drawn either from inside a historical crisis window (with
//! probability `crisis_weight`) or from the calm part of the history. Calm
//! blocks use rejection sampling capped at [`MAX_NORMAL_BLOCK_ATTEMPTS`];
//! when every attempt overlaps a crisis the resampler accepts an unfiltered
//! block. That fallback keeps sampling bounded but mixes crisis returns into
//! the calm stratum, so it is counted in [`CrisisSamplingStats`] and logged.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::rng::RandomSource;

use super::types::{
    BlockIndexSet, BootstrapSequence, CrisisPeriod, ReturnSeries, CRISIS_BLOCK_LENGTH,
    MAX_NORMAL_BLOCK_ATTEMPTS,
};

/// How the blocks of one stratified sequence were obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisSamplingStats {
    /// Blocks drawn from inside a crisis period
    pub crisis_blocks: usize,

    /// Blocks drawn from the calm stratum without overlap
    pub normal_blocks: usize,

    /// Calm-stratum blocks accepted after exhausting every attempt
    pub fallback_blocks: usize,

    /// Candidate calm blocks rejected for overlapping a crisis
    pub rejected_attempts: usize,
}

impl CrisisSamplingStats {
    pub fn total_blocks(&self) -> usize {
        self.crisis_blocks + self.normal_blocks + self.fallback_blocks
    }

    /// Share of calm-stratum draws that fell back to an unfiltered block
    pub fn fallback_rate(&self) -> f64 {
        let calm = self.normal_blocks + self.fallback_blocks;
        if calm == 0 {
            0.0
        } else {
            self.fallback_blocks as f64 / calm as f64
        }
    }

    /// Combine stats from several sequences
    pub fn merge(&mut self, other: &CrisisSamplingStats) {
        self.crisis_blocks += other.crisis_blocks;
        self.normal_blocks += other.normal_blocks;
        self.fallback_blocks += other.fallback_blocks;
        self.rejected_attempts += other.rejected_attempts;
    }
}

/// Stratified path plus its block structure and sampling counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisStratifiedSequence {
    pub sequence: BootstrapSequence,
    pub block_indices: BlockIndexSet,
    pub stats: CrisisSamplingStats,
}

/// Build a path that over- or under-weights crisis periods
///
/// With an empty `crisis_periods` list every block takes the calm path,
/// whatever the weight.
///
/// # Errors
/// `InvalidProbability` for a weight outside [0, 1], `InsufficientHistory`
/// when the series is not longer than [`CRISIS_BLOCK_LENGTH`], and
/// `InvalidCrisisPeriod` / `CrisisPeriodOutOfRange` for malformed windows.
pub fn generate_crisis_stratified_sequence(
    series: &ReturnSeries,
    crisis_periods: &[CrisisPeriod],
    target_length: usize,
    crisis_weight: f64,
    rng: &mut RandomSource,
) -> Result<CrisisStratifiedSequence> {
    ConfigurationError::check_probability("crisis_weight", crisis_weight)?;
    series.require_longer_than(CRISIS_BLOCK_LENGTH)?;
    for period in crisis_periods {
        period.validate()?;
        if period.end > series.len() {
            return Err(ConfigurationError::CrisisPeriodOutOfRange {
                start: period.start,
                end: period.end,
                len: series.len(),
            });
        }
    }

    let returns = series.as_slice();
    let mut sequence = Vec::with_capacity(target_length);
    let mut block_indices = Vec::new();
    let mut stats = CrisisSamplingStats::default();

    while sequence.len() < target_length {
        let use_crisis = rng.next() < crisis_weight && !crisis_periods.is_empty();

        let (start, block_length) = if use_crisis {
            stats.crisis_blocks += 1;
            sample_crisis_block(crisis_periods, rng)
        } else {
            let start = sample_normal_block(returns.len(), crisis_periods, rng, &mut stats);
            (start, CRISIS_BLOCK_LENGTH)
        };

        block_indices.push(start);
        let take = block_length.min(target_length - sequence.len());
        sequence.extend_from_slice(&returns[start..start + take]);
    }

    if stats.fallback_blocks > 0 {
        warn!(
            "Crisis stratification defeated for {} of {} calm blocks ({} rejected attempts); crisis periods may cover most of the history",
            stats.fallback_blocks,
            stats.normal_blocks + stats.fallback_blocks,
            stats.rejected_attempts
        );
    }

    Ok(CrisisStratifiedSequence { sequence, block_indices, stats })
}

/// Pick a crisis period and a block lying entirely inside it
fn sample_crisis_block(crisis_periods: &[CrisisPeriod], rng: &mut RandomSource) -> (usize, usize) {
    let period = crisis_periods[rng.index_below(crisis_periods.len())];
    let block_length = CRISIS_BLOCK_LENGTH.min(period.len());
    let offset = rng.index_below(period.len() - block_length + 1);
    (period.start + offset, block_length)
}

/// Rejection-sample a calm block start, falling back to any start
fn sample_normal_block(
    series_len: usize,
    crisis_periods: &[CrisisPeriod],
    rng: &mut RandomSource,
    stats: &mut CrisisSamplingStats,
) -> usize {
    let start_range = series_len - CRISIS_BLOCK_LENGTH;

    for _ in 0..MAX_NORMAL_BLOCK_ATTEMPTS {
        let start = rng.index_below(start_range);
        let overlaps = crisis_periods
            .iter()
            .any(|p| p.overlaps(start, CRISIS_BLOCK_LENGTH));
        if !overlaps {
            stats.normal_blocks += 1;
            return start;
        }
        stats.rejected_attempts += 1;
    }

    stats.fallback_blocks += 1;
    rng.index_below(start_range)
}
