//! Calculation configuration
//!
//! Parameter overrides can be supplied as TOML. Missing sections and keys fall
//! back to their defaults.
//!
//! ```
//! use rscarbon_components::config::CalculationConfig;
//!
//! let config = CalculationConfig::from_toml_str(
//!     r#"
//!     [biomass]
//!     a = 0.0509
//!     b = 2.5
//!
//!     [turnover]
//!     start_year = 2025
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.turnover.start_year, 2025);
//! assert_eq!(config.biomass.root_shoot_ratio, 0.24);
//! ```

use crate::parameters::{BiomassParameters, TurnoverParameters};
use rscarbon_core::errors::{RSCarbonError, RSCarbonResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculationConfig {
    pub biomass: BiomassParameters,
    pub turnover: TurnoverParameters,
}

impl CalculationConfig {
    pub fn from_toml_str(contents: &str) -> RSCarbonResult<Self> {
        toml::from_str(contents).map_err(|e| RSCarbonError::Config(e.to_string()))
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> RSCarbonResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RSCarbonError::Config(format!("could not read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> RSCarbonResult<String> {
        toml::to_string(self).map_err(|e| RSCarbonError::Config(e.to_string()))
    }
}
