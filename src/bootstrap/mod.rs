//! Block bootstrap resampling of historical returns
//!
//! Three variants share the same block mechanics:
//! - **Single asset**: blocks copied without wraparound
//! - **Correlated multi-asset**: equity block starts replayed on bonds and alternatives
//! - **Crisis-stratified**: blocks drawn from inside or outside crisis windows

mod types;
mod block;
mod multi_asset;
mod crisis;

pub use types::{
    AssetHistories, BlockIndexSet, BootstrapConfig, BootstrapSequence, CorrelatedSequence,
    CrisisPeriod, MultiAssetBootstrapResult, ReturnSeries, CRISIS_BLOCK_LENGTH,
    DEFAULT_BLOCK_LENGTH, DEFAULT_CRISIS_WEIGHT, MAX_NORMAL_BLOCK_ATTEMPTS,
};
pub use block::{generate_block_sequence, generate_correlated_sequence};
pub use multi_asset::{generate_multi_asset_bootstrap, generate_multi_asset_sequence};
pub use crisis::{
    generate_crisis_stratified_sequence, CrisisSamplingStats, CrisisStratifiedSequence,
};
