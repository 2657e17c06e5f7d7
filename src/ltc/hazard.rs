//! Age- and gender-specific LTC onset hazard
//!
//! Annual onset probability grows exponentially with age from a base rate at
//! a reference age, with a flat multiplier for women, and is capped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Exponential growth of onset hazard per year of age
pub const HAZARD_AGE_SLOPE: f64 = 0.08;

/// Upper bound on the annual onset probability
pub const MAX_HAZARD: f64 = 0.4;

/// Hazard multiplier applied to women
pub const FEMALE_HAZARD_MULTIPLIER: f64 = 1.3;

/// Gender of the person being projected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn hazard_multiplier(self) -> f64 {
        match self {
            Gender::Female => FEMALE_HAZARD_MULTIPLIER,
            Gender::Male => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

/// Annual probability of LTC onset at `age`
///
/// `min(base_hazard * gender_multiplier * exp(0.08 * (age - age0)), 0.4)`
pub fn hazard_rate(age: u8, base_hazard: f64, age0: u8, gender: Gender) -> f64 {
    let years_from_reference = age as f64 - age0 as f64;
    let hazard =
        base_hazard * gender.hazard_multiplier() * (HAZARD_AGE_SLOPE * years_from_reference).exp();
    hazard.min(MAX_HAZARD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_reference_age_returns_base() {
        assert_relative_eq!(hazard_rate(65, 0.01, 65, Gender::Male), 0.01);
        assert_relative_eq!(hazard_rate(65, 0.01, 65, Gender::Female), 0.013);
    }

    #[test]
    fn test_exponential_growth() {
        let h75 = hazard_rate(75, 0.01, 65, Gender::Male);
        assert_relative_eq!(h75, 0.01 * (0.8_f64).exp(), epsilon = 1e-12);

        let ratio = hazard_rate(76, 0.01, 65, Gender::Male) / h75;
        assert_relative_eq!(ratio, (0.08_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_younger_than_reference_is_lower() {
        assert!(hazard_rate(55, 0.01, 65, Gender::Male) < 0.01);
    }

    #[test]
    fn test_cap() {
        assert_eq!(hazard_rate(110, 0.05, 65, Gender::Female), MAX_HAZARD);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("m".parse::<Gender>(), Ok(Gender::Male));
        assert!("x".parse::<Gender>().is_err());
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
    }

    proptest! {
        #[test]
        fn prop_hazard_never_exceeds_cap(
            age in 0u8..=120,
            age0 in 0u8..=120,
            base in 0.0f64..=1.0,
            female in any::<bool>(),
        ) {
            let gender = if female { Gender::Female } else { Gender::Male };
            let h = hazard_rate(age, base, age0, gender);
            prop_assert!(h <= MAX_HAZARD);
            prop_assert!(h >= 0.0);
        }
    }
}
