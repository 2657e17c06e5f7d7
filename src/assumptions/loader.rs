//! CSV-based history loader
//!
//! Loads return histories and crisis windows from CSV files in data/history/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::bootstrap::{AssetHistories, CrisisPeriod, ReturnSeries};
use crate::error::{ConfigurationError, LoadError};

/// Default path to history directory
pub const DEFAULT_HISTORY_PATH: &str = "data/history";

pub const RETURNS_FILE: &str = "returns.csv";
pub const CRISIS_PERIODS_FILE: &str = "crisis_periods.csv";

/// The `period` label column is ignored; rows are taken in file order
#[derive(Debug, Deserialize)]
struct ReturnRow {
    equity: f64,
    bonds: f64,
    alternatives: f64,
}

#[derive(Debug, Deserialize)]
struct CrisisRow {
    name: String,
    start: usize,
    end: usize,
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read `period,equity,bonds,alternatives` rows, one per period in order
pub fn read_histories<R: Read>(reader: R) -> Result<AssetHistories, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);

    let mut equity = Vec::new();
    let mut bonds = Vec::new();
    let mut alternatives = Vec::new();

    for result in reader.deserialize() {
        let row: ReturnRow = result?;
        equity.push(row.equity);
        bonds.push(row.bonds);
        alternatives.push(row.alternatives);
    }

    Ok(AssetHistories {
        equity: ReturnSeries::new(equity)?,
        bonds: ReturnSeries::new(bonds)?,
        alternatives: ReturnSeries::new(alternatives)?,
    })
}

/// Read `name,start,end` rows; windows are half-open and must fit `series_len`
pub fn read_crisis_periods<R: Read>(
    reader: R,
    series_len: usize,
) -> Result<Vec<CrisisPeriod>, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut periods = Vec::new();

    for result in reader.deserialize() {
        let row: CrisisRow = result?;
        let period = CrisisPeriod::new(row.start, row.end)?;
        if period.end > series_len {
            return Err(ConfigurationError::CrisisPeriodOutOfRange {
                start: period.start,
                end: period.end,
                len: series_len,
            }
            .into());
        }
        debug!("Crisis period {}: [{}, {})", row.name, row.start, row.end);
        periods.push(period);
    }

    Ok(periods)
}

/// Load return histories from `returns.csv` in the given directory
pub fn load_histories(path: &Path) -> Result<AssetHistories, LoadError> {
    read_histories(open(&path.join(RETURNS_FILE))?)
}

/// Load crisis windows from `crisis_periods.csv` in the given directory
pub fn load_crisis_periods(path: &Path, series_len: usize) -> Result<Vec<CrisisPeriod>, LoadError> {
    read_crisis_periods(open(&path.join(CRISIS_PERIODS_FILE))?, series_len)
}

/// Everything read from one history directory
#[derive(Debug, Clone)]
pub struct LoadedHistory {
    pub histories: AssetHistories,
    pub crisis_periods: Vec<CrisisPeriod>,
}

impl LoadedHistory {
    /// Load from the default path
    pub fn load_default() -> Result<Self, LoadError> {
        Self::load_from(Path::new(DEFAULT_HISTORY_PATH))
    }

    /// Load from a specific path
    ///
    /// Crisis windows are checked against the shortest history so that they
    /// index valid periods of every asset class.
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        let histories = load_histories(path)?;
        let shortest = histories
            .equity
            .len()
            .min(histories.bonds.len())
            .min(histories.alternatives.len());
        let crisis_periods = load_crisis_periods(path, shortest)?;
        Ok(Self { histories, crisis_periods })
    }
}
