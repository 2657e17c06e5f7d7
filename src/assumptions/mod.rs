//! Planning assumptions: return histories, crisis windows and model parameters

mod history;
pub mod loader;

pub use history::{default_crisis_periods, FIRST_YEAR};
pub use loader::LoadedHistory;

use std::path::Path;

use crate::bootstrap::{AssetHistories, BootstrapConfig, CrisisPeriod};
use crate::error::LoadError;
use crate::ltc::LtcConfig;

/// Container for all simulation assumptions
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub histories: AssetHistories,
    pub crisis_periods: Vec<CrisisPeriod>,
    pub bootstrap: BootstrapConfig,
    pub ltc: LtcConfig,
}

impl Assumptions {
    /// Built-in annual US history with default resampling and LTC parameters
    pub fn default_planning() -> Self {
        Self {
            histories: AssetHistories::annual_us(),
            crisis_periods: default_crisis_periods().into_iter().map(|(_, p)| p).collect(),
            bootstrap: BootstrapConfig::default(),
            ltc: LtcConfig::default(),
        }
    }

    /// Load histories from CSV files in the default location (data/history/)
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_HISTORY_PATH))
    }

    /// Load histories from CSV files in a specific directory
    ///
    /// Model parameters keep their defaults.
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        let loaded = LoadedHistory::load_from(path)?;

        Ok(Self {
            histories: loaded.histories,
            crisis_periods: loaded.crisis_periods,
            ..Self::default_planning()
        })
    }
}
