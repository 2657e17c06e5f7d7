//! Built-in annual return history used by the default planning assumptions
//!
//! Annual total returns for 1970-2023:
//! - Equity: large-cap US stocks including dividends
//! - Bonds: 10-year US Treasury
//! - Alternatives: US residential real estate
//!
//! Crisis windows are half-open year indices into the same table.

use crate::bootstrap::{AssetHistories, CrisisPeriod, ReturnSeries};

/// First calendar year of the built-in table
pub const FIRST_YEAR: u16 = 1970;

impl AssetHistories {
    /// Built-in annual histories
    pub fn annual_us() -> Self {
        let table = annual_returns();
        Self {
            equity: ReturnSeries::from_table(table.iter().map(|r| r.1).collect()),
            bonds: ReturnSeries::from_table(table.iter().map(|r| r.2).collect()),
            alternatives: ReturnSeries::from_table(table.iter().map(|r| r.3).collect()),
        }
    }
}

/// Named crisis windows over the built-in table
pub fn default_crisis_periods() -> Vec<(&'static str, CrisisPeriod)> {
    vec![
        ("oil_shock", CrisisPeriod { start: 3, end: 5 }),
        ("dot_com", CrisisPeriod { start: 30, end: 33 }),
        ("financial_crisis", CrisisPeriod { start: 37, end: 39 }),
        ("inflation_shock", CrisisPeriod { start: 52, end: 53 }),
    ]
}

/// (year, equity, bonds, alternatives)
fn annual_returns() -> Vec<(u16, f64, f64, f64)> {
    vec![
        (1970, 0.0401, 0.1675, 0.0822),
        (1971, 0.1431, 0.0979, 0.0436),
        (1972, 0.1898, 0.0282, 0.0380),
        (1973, -0.1466, 0.0366, 0.0454),
        (1974, -0.2647, 0.0199, 0.0637),
        (1975, 0.3720, 0.0361, 0.0817),
        (1976, 0.2384, 0.1598, 0.0899),
        (1977, -0.0718, 0.0129, 0.1341),
        (1978, 0.0656, -0.0078, 0.1475),
        (1979, 0.1844, 0.0067, 0.1453),
        (1980, 0.3242, -0.0299, 0.0821),
        (1981, -0.0491, 0.0820, 0.0691),
        (1982, 0.2155, 0.3281, 0.0161),
        (1983, 0.2256, 0.0320, 0.0435),
        (1984, 0.0627, 0.1373, 0.0375),
        (1985, 0.3173, 0.2571, 0.0583),
        (1986, 0.1867, 0.2428, 0.0839),
        (1987, 0.0525, -0.0496, 0.0833),
        (1988, 0.1661, 0.0822, 0.0655),
        (1989, 0.3169, 0.1769, 0.0403),
        (1990, -0.0310, 0.0624, -0.0090),
        (1991, 0.3047, 0.1500, -0.0085),
        (1992, 0.0762, 0.0936, 0.0085),
        (1993, 0.1008, 0.1421, 0.0205),
        (1994, 0.0132, -0.0804, 0.0137),
        (1995, 0.3758, 0.2348, 0.0124),
        (1996, 0.2296, 0.0143, 0.0265),
        (1997, 0.3336, 0.0994, 0.0360),
        (1998, 0.2858, 0.1492, 0.0575),
        (1999, 0.2104, -0.0825, 0.0720),
        (2000, -0.0910, 0.1666, 0.0921),
        (2001, -0.1189, 0.0557, 0.0678),
        (2002, -0.2210, 0.1512, 0.0936),
        (2003, 0.2868, 0.0038, 0.0973),
        (2004, 0.1088, 0.0449, 0.1344),
        (2005, 0.0491, 0.0287, 0.1351),
        (2006, 0.1579, 0.0196, 0.0173),
        (2007, 0.0549, 0.1021, -0.0540),
        (2008, -0.3700, 0.2010, -0.1200),
        (2009, 0.2646, -0.1112, -0.0385),
        (2010, 0.1506, 0.0846, -0.0412),
        (2011, 0.0211, 0.1604, -0.0388),
        (2012, 0.1600, 0.0297, 0.0644),
        (2013, 0.3239, -0.0910, 0.1071),
        (2014, 0.1369, 0.1075, 0.0451),
        (2015, 0.0138, 0.0128, 0.0520),
        (2016, 0.1177, 0.0069, 0.0531),
        (2017, 0.2161, 0.0280, 0.0621),
        (2018, -0.0423, -0.0002, 0.0453),
        (2019, 0.3121, 0.0964, 0.0369),
        (2020, 0.1802, 0.1133, 0.1043),
        (2021, 0.2847, -0.0442, 0.1881),
        (2022, -0.1804, -0.1783, 0.0577),
        (2023, 0.2606, 0.0388, 0.0550),
    ]
}
