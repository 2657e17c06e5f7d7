//! LTC insurance benefit and present value of expected care cost

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

use super::discount::DiscountCurve;
use super::projection::LtcYearProjection;

/// Days in a benefit year
pub const DAYS_PER_YEAR: u32 = 365;

/// Terms of an LTC insurance policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtcInsuranceCoverage {
    /// Daily benefit in today's dollars
    pub daily_benefit: f64,

    /// Years benefits are paid once triggered
    pub benefit_period_years: f64,

    /// Uncovered days at the start of each claim year
    pub elimination_period_days: u32,

    /// Whether the daily benefit grows with inflation
    pub inflation_protection: bool,
}

impl LtcInsuranceCoverage {
    pub fn validate(&self) -> Result<()> {
        if !(self.daily_benefit.is_finite() && self.daily_benefit >= 0.0) {
            return Err(ConfigurationError::InvalidParameter {
                name: "daily_benefit",
                value: self.daily_benefit,
            });
        }
        if !(self.benefit_period_years.is_finite() && self.benefit_period_years >= 0.0) {
            return Err(ConfigurationError::InvalidParameter {
                name: "benefit_period_years",
                value: self.benefit_period_years,
            });
        }
        Ok(())
    }
}

/// Total benefit payable if care begins at `projected_age`
///
/// With inflation protection the daily benefit grows by
/// `(1 + inflation)^(projected_age - current_age)`. The elimination period
/// (capped at a full year) is removed from each 365-day benefit year.
pub fn calculate_ltc_insurance_benefit(
    coverage: &LtcInsuranceCoverage,
    inflation: f64,
    current_age: u8,
    projected_age: u8,
) -> Result<f64> {
    coverage.validate()?;
    ConfigurationError::check_rate("inflation", inflation)?;

    let adjusted_benefit = if coverage.inflation_protection {
        let years = projected_age as i32 - current_age as i32;
        coverage.daily_benefit * (1.0 + inflation).powi(years)
    } else {
        coverage.daily_benefit
    };

    let coverage_days = DAYS_PER_YEAR - coverage.elimination_period_days.min(DAYS_PER_YEAR);
    Ok(adjusted_benefit * coverage_days as f64 * coverage.benefit_period_years)
}

/// Present value of hazard-weighted annual care cost
///
/// `sum(onset_probability * annual_cost * (1 + discount_rate)^-(age - current_age))`
pub fn calculate_ltc_risk_present_value(
    projections: &[LtcYearProjection],
    discount_rate: f64,
    current_age: u8,
) -> Result<f64> {
    let curve = DiscountCurve::single_rate(discount_rate)?;
    Ok(present_value_on_curve(projections, &curve, current_age))
}

/// Same as [`calculate_ltc_risk_present_value`] on an arbitrary curve
pub fn present_value_on_curve(
    projections: &[LtcYearProjection],
    curve: &DiscountCurve,
    current_age: u8,
) -> f64 {
    let payments: Vec<(u32, f64, f64)> = projections
        .iter()
        .map(|p| {
            (
                p.age.saturating_sub(current_age) as u32,
                p.onset_probability,
                p.annual_cost,
            )
        })
        .collect();
    curve.pv_contingent_stream(&payments)
}
