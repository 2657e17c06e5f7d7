//! Correlated multi-asset bootstrap
//!
//! Equity blocks are drawn first; bonds and alternatives replay the same
//! block starts so that every synthetic year pairs asset returns that were
//! observed together historically.

use log::{debug, info};
use rayon::prelude::*;

use crate::error::Result;
use crate::rng::{RandomSource, Seed};

use super::block::generate_correlated_sequence;
use super::types::{AssetHistories, BootstrapConfig, MultiAssetBootstrapResult};

/// Draw one correlated equity/bond/alternative path set
pub fn generate_multi_asset_sequence(
    histories: &AssetHistories,
    config: &BootstrapConfig,
    target_length: usize,
    rng: &mut RandomSource,
) -> Result<MultiAssetBootstrapResult> {
    let block_length = config.block_length;

    let equity =
        generate_correlated_sequence(&histories.equity, target_length, block_length, None, rng)?;
    let blocks = Some(equity.block_indices.as_slice());
    let bonds =
        generate_correlated_sequence(&histories.bonds, target_length, block_length, blocks, rng)?;
    let alternatives = generate_correlated_sequence(
        &histories.alternatives,
        target_length,
        block_length,
        blocks,
        rng,
    )?;

    Ok(MultiAssetBootstrapResult { equity, bonds, alternatives })
}

/// Generate `n_sequences` correlated path sets in parallel
///
/// Sequence `i` draws from `RandomSource::for_unit(seed, i)`, so the batch is
/// reproducible for a given seed regardless of how rayon schedules it.
pub fn generate_multi_asset_bootstrap(
    histories: &AssetHistories,
    config: &BootstrapConfig,
    n_sequences: usize,
    target_length: usize,
    seed: impl Into<Seed>,
) -> Result<Vec<MultiAssetBootstrapResult>> {
    config.validate()?;
    histories.equity.require_longer_than(config.block_length)?;
    histories.bonds.require_longer_than(config.block_length)?;
    histories.alternatives.require_longer_than(config.block_length)?;

    let base_seed = seed.into().to_u64();
    debug!(
        "Generating {} multi-asset sequences of length {} (block length {})",
        n_sequences, target_length, config.block_length
    );

    let results = (0..n_sequences)
        .into_par_iter()
        .map(|i| {
            let mut rng = RandomSource::for_unit(base_seed, i as u64);
            generate_multi_asset_sequence(histories, config, target_length, &mut rng)
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Generated {} multi-asset bootstrap sequences", results.len());
    Ok(results)
}
