//! Discount curve for present-valuing projected care costs

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// Flat annual discount curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountCurve {
    pub annual_rate: f64,
}

impl DiscountCurve {
    /// Create a flat curve
    pub fn single_rate(annual_rate: f64) -> Result<Self> {
        ConfigurationError::check_rate("discount_rate", annual_rate)?;
        Ok(Self { annual_rate })
    }

    /// Discount factor `(1 + r)^-t` to `years` from today
    pub fn discount_to_year(&self, years: u32) -> f64 {
        (1.0 + self.annual_rate).powi(-(years as i32))
    }

    /// Present value of `(year, probability, amount)` contingent payments
    pub fn pv_contingent_stream(&self, payments: &[(u32, f64, f64)]) -> f64 {
        payments
            .iter()
            .map(|(year, prob, amount)| prob * amount * self.discount_to_year(*year))
            .sum()
    }
}
