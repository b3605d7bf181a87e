//! Soil turnover simulation settings

use crate::constants::DEFAULT_SIMULATION_START_YEAR;
use serde::{Deserialize, Serialize};

/// Settings for the soil turnover simulation
///
/// The decomposition coefficients are fixed (see [`crate::constants`]); only the
/// calendar anchoring of the simulation can be changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnoverParameters {
    /// Calendar year of the first simulated year.
    ///
    /// Simulated year `n` (0-indexed) reads the monthly climate and management
    /// records of calendar year `start_year + n`.
    ///
    /// default: 2024
    pub start_year: i32,
}

impl Default for TurnoverParameters {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_SIMULATION_START_YEAR,
        }
    }
}
