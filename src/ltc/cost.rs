//! Annual care-cost model

use super::config::CareCosts;
use super::state::CareIntensity;

/// Inflated annual cost of care at a given tier
///
/// Base costs are 2024 dollars; `years_elapsed` is the number of years since
/// the projection start, compounded at `inflation`.
pub fn annual_cost(
    intensity: CareIntensity,
    costs: &CareCosts,
    inflation: f64,
    years_elapsed: u32,
) -> f64 {
    let base = costs.base_cost(intensity);
    if base == 0.0 {
        return 0.0;
    }
    base * (1.0 + inflation).powi(years_elapsed as i32)
}

/// Tier used for costing a raw intensity value
///
/// (0, 0.33] is mild, (0.33, 0.66] moderate, above 0.66 severe, and zero or
/// below is no care.
pub fn cost_tier(intensity: f64) -> CareIntensity {
    const EPS: f64 = 1e-9;
    if intensity <= 0.0 {
        CareIntensity::None
    } else if intensity <= 0.33 + EPS {
        CareIntensity::Mild
    } else if intensity <= 0.66 + EPS {
        CareIntensity::Moderate
    } else {
        CareIntensity::Severe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tier_costs() {
        let costs = CareCosts::default();
        assert_eq!(annual_cost(CareIntensity::None, &costs, 0.03, 10), 0.0);
        assert_relative_eq!(annual_cost(CareIntensity::Mild, &costs, 0.03, 0), costs.mild());
        assert_relative_eq!(
            annual_cost(CareIntensity::Moderate, &costs, 0.03, 0),
            costs.assisted_living
        );
        assert_relative_eq!(
            annual_cost(CareIntensity::Severe, &costs, 0.03, 0),
            costs.nursing_home
        );
    }

    #[test]
    fn test_inflation_compounds() {
        let costs = CareCosts::default();
        let cost = annual_cost(CareIntensity::Severe, &costs, 0.04, 10);
        assert_relative_eq!(cost, costs.nursing_home * 1.04_f64.powi(10), epsilon = 1e-6);
    }

    #[test]
    fn test_cost_tier_thresholds() {
        assert_eq!(cost_tier(0.0), CareIntensity::None);
        assert_eq!(cost_tier(0.2), CareIntensity::Mild);
        assert_eq!(cost_tier(0.33), CareIntensity::Mild);
        assert_eq!(cost_tier(0.5), CareIntensity::Moderate);
        assert_eq!(cost_tier(0.66), CareIntensity::Moderate);
        assert_eq!(cost_tier(0.7), CareIntensity::Severe);
        assert_eq!(cost_tier(1.0), CareIntensity::Severe);
    }
}
