//! Single-asset and correlated block bootstrap

use crate::error::{ConfigurationError, Result};
use crate::rng::RandomSource;

use super::types::{BootstrapSequence, CorrelatedSequence, ReturnSeries};

/// Build a synthetic path from contiguous historical blocks
///
/// Each block starts at a uniform index in `[0, len - block_length)` and is
/// copied without wraparound. The last block is cut short so the result has
/// exactly `target_length` returns.
///
/// # Errors
/// `InsufficientHistory` when the series is not longer than `block_length`.
pub fn generate_block_sequence(
    series: &ReturnSeries,
    target_length: usize,
    block_length: usize,
    rng: &mut RandomSource,
) -> Result<BootstrapSequence> {
    series.require_longer_than(block_length)?;

    let returns = series.as_slice();
    let start_range = returns.len() - block_length;
    let mut sequence = Vec::with_capacity(target_length);

    while sequence.len() < target_length {
        let start = rng.index_below(start_range);
        let take = block_length.min(target_length - sequence.len());
        sequence.extend_from_slice(&returns[start..start + take]);
    }

    Ok(sequence)
}

/// Block bootstrap with circular indexing and optional block replay
///
/// When `predefined_blocks` is given no draws are made: block starts are read
/// from it in order, which lets a second asset class reuse the block
/// structure (and so the cross-asset correlation) of the first. Indices are
/// taken modulo the series length, so starts recorded on a longer history
/// stay valid on a shorter one.
///
/// # Errors
/// `InsufficientHistory` as for [`generate_block_sequence`], and
/// `PredefinedBlocksExhausted` when the replay list has fewer starts than the
/// target length needs.
pub fn generate_correlated_sequence(
    series: &ReturnSeries,
    target_length: usize,
    block_length: usize,
    predefined_blocks: Option<&[usize]>,
    rng: &mut RandomSource,
) -> Result<CorrelatedSequence> {
    series.require_longer_than(block_length)?;

    let blocks_needed = target_length.div_ceil(block_length);
    if let Some(blocks) = predefined_blocks {
        if blocks.len() < blocks_needed {
            return Err(ConfigurationError::PredefinedBlocksExhausted {
                needed: blocks_needed,
                available: blocks.len(),
            });
        }
    }

    let returns = series.as_slice();
    let n = returns.len();
    let mut sequence = Vec::with_capacity(target_length);
    let mut block_indices = Vec::with_capacity(blocks_needed);

    while sequence.len() < target_length {
        let start = match predefined_blocks {
            Some(blocks) => blocks[block_indices.len()],
            None => rng.index_below(n - block_length),
        };
        block_indices.push(start);

        for offset in 0..block_length {
            if sequence.len() >= target_length {
                break;
            }
            sequence.push(returns[(start + offset) % n]);
        }
    }

    Ok(CorrelatedSequence { sequence, block_indices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp(n: usize) -> ReturnSeries {
        ReturnSeries::new((0..n).map(|i| i as f64 / 100.0).collect()).unwrap()
    }

    #[test]
    fn test_block_sequence_length_and_contiguity() {
        let series = ramp(40);
        let mut rng = RandomSource::new(1u64);

        let seq = generate_block_sequence(&series, 30, 12, &mut rng).unwrap();
        assert_eq!(seq.len(), 30);

        // Within each block consecutive values step by exactly one period
        for block in seq.chunks(12) {
            for pair in block.windows(2) {
                assert!((pair[1] - pair[0] - 0.01).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_block_sequence_never_reads_past_end() {
        // Last valid start is len - block_length - 1, so the final value is never used
        let series = ramp(13);
        let mut rng = RandomSource::new(3u64);
        let seq = generate_block_sequence(&series, 500, 12, &mut rng).unwrap();
        assert!(seq.iter().all(|&r| r < 0.12 - 1e-9));
    }

    #[test]
    fn test_insufficient_history_rejected() {
        let series = ramp(12);
        let mut rng = RandomSource::new(1u64);
        let err = generate_block_sequence(&series, 10, 12, &mut rng).unwrap_err();
        assert_eq!(err, ConfigurationError::InsufficientHistory { len: 12, block_length: 12 });

        let err = generate_block_sequence(&series, 10, 0, &mut rng).unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidBlockLength);
    }

    #[test]
    fn test_zero_target_is_empty() {
        let series = ramp(20);
        let mut rng = RandomSource::new(1u64);
        assert!(generate_block_sequence(&series, 0, 5, &mut rng).unwrap().is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_block_sequence_deterministic() {
        let series = ramp(50);
        let a = generate_block_sequence(&series, 60, 12, &mut RandomSource::new("seed")).unwrap();
        let b = generate_block_sequence(&series, 60, 12, &mut RandomSource::new("seed")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_correlated_sequence_records_blocks() {
        let series = ramp(30);
        let mut rng = RandomSource::new(5u64);
        let result = generate_correlated_sequence(&series, 25, 12, None, &mut rng).unwrap();

        assert_eq!(result.sequence.len(), 25);
        assert_eq!(result.block_indices.len(), 3);
        for (block, &start) in result.sequence.chunks(12).zip(&result.block_indices) {
            assert!((block[0] - start as f64 / 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_correlated_replay_wraps_and_draws_nothing() {
        let series = ramp(10);
        let mut rng = RandomSource::new(5u64);
        let blocks = [8, 23];

        let result = generate_correlated_sequence(&series, 8, 4, Some(&blocks[..]), &mut rng).unwrap();
        assert_eq!(rng.draws(), 0);
        assert_eq!(result.block_indices, vec![8, 23]);

        // 8, 9, then wraps to 0, 1; 23 % 10 = 3
        let expected = [0.08, 0.09, 0.00, 0.01, 0.03, 0.04, 0.05, 0.06];
        for (got, want) in result.sequence.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_correlated_replay_too_short() {
        let series = ramp(20);
        let mut rng = RandomSource::new(5u64);
        let err = generate_correlated_sequence(&series, 30, 12, Some(&[1, 2][..]), &mut rng).unwrap_err();
        assert_eq!(err, ConfigurationError::PredefinedBlocksExhausted { needed: 3, available: 2 });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_block_sequence_has_exact_length(
            seed in any::<u64>(),
            history in 2usize..80,
            block in 1usize..24,
            target in 0usize..200,
        ) {
            prop_assume!(history > block);
            let series = ramp(history);
            let mut rng = RandomSource::new(seed);
            let seq = generate_block_sequence(&series, target, block, &mut rng).unwrap();
            prop_assert_eq!(seq.len(), target);

            let correlated = generate_correlated_sequence(&series, target, block, None, &mut rng).unwrap();
            prop_assert_eq!(correlated.sequence.len(), target);
        }
    }
}
