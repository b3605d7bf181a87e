//! Allometric biomass parameters

use crate::constants::{
    DEFAULT_ALLOMETRIC_A, DEFAULT_ALLOMETRIC_B, DEFAULT_CARBON_FRACTION, DEFAULT_CO2_CONVERSION,
    DEFAULT_ROOT_SHOOT_RATIO,
};
use rscarbon_core::errors::RSCarbonResult;
use rscarbon_core::validation::{Interval, Validate};
use serde::{Deserialize, Serialize};

/// Coefficients of the allometric biomass equation
///
/// Aboveground biomass of a single tree is estimated as
///
/// $$AGB = a \cdot D^b$$
///
/// where $D$ is the stem diameter at breast height (cm). Overriding `a` and `b`
/// is how species- or region-specific allometric equations are supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomassParameters {
    /// Scaling coefficient
    /// unit: kg / cm^b
    /// default: 0.0673
    pub a: f64,

    /// Exponent on stem diameter
    /// unit: dimensionless
    /// default: 2.84
    pub b: f64,

    /// Belowground biomass as a fraction of aboveground biomass
    /// unit: dimensionless
    /// default: 0.24
    pub root_shoot_ratio: f64,

    /// Carbon content of dry biomass
    /// unit: kg C / kg
    /// default: 0.47
    pub carbon_fraction: f64,

    /// Conversion from carbon to CO2 mass
    /// unit: kg CO2 / kg C
    /// default: 3.67
    pub co2_conversion: f64,
}

impl Default for BiomassParameters {
    fn default() -> Self {
        Self {
            a: DEFAULT_ALLOMETRIC_A,
            b: DEFAULT_ALLOMETRIC_B,
            root_shoot_ratio: DEFAULT_ROOT_SHOOT_RATIO,
            carbon_fraction: DEFAULT_CARBON_FRACTION,
            co2_conversion: DEFAULT_CO2_CONVERSION,
        }
    }
}

impl Validate for BiomassParameters {
    fn validate(&self) -> RSCarbonResult<()> {
        Interval::positive().check("a", self.a)?;
        Interval::positive().check("b", self.b)?;
        Interval::non_negative().check("root_shoot_ratio", self.root_shoot_ratio)?;
        Interval::left_open(0.0, 1.0).check("carbon_fraction", self.carbon_fraction)?;
        Interval::positive().check("co2_conversion", self.co2_conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = BiomassParameters::default();
        assert!((params.a - 0.0673).abs() < 1e-10);
        assert!((params.b - 2.84).abs() < 1e-10);
        assert!((params.root_shoot_ratio - 0.24).abs() < 1e-10);
        assert!((params.carbon_fraction - 0.47).abs() < 1e-10);
        assert!((params.co2_conversion - 3.67).abs() < 1e-10);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let params: BiomassParameters = serde_json::from_str(r#"{"a": 0.1}"#).unwrap();
        assert!((params.a - 0.1).abs() < 1e-10);
        assert!((params.b - DEFAULT_ALLOMETRIC_B).abs() < 1e-10);
    }

    #[test]
    fn test_validate() {
        BiomassParameters::default().validate().unwrap();

        let invalid = [
            BiomassParameters { b: f64::NAN, ..BiomassParameters::default() },
            BiomassParameters { b: -1.0, ..BiomassParameters::default() },
            BiomassParameters { a: 0.0, ..BiomassParameters::default() },
            BiomassParameters { carbon_fraction: 1.5, ..BiomassParameters::default() },
            BiomassParameters { root_shoot_ratio: f64::INFINITY, ..BiomassParameters::default() },
        ];
        for params in invalid {
            assert!(params.validate().is_err(), "Expected {params:?} to be rejected");
        }
    }
}
