//! Baseline Emissions Component
//!
//! Estimates non-CO2 greenhouse-gas emissions of the baseline land-management
//! scenario and expresses them as CO2-equivalent.
//!
//! # What This Component Does
//!
//! 1. Direct N2O from synthetic fertilizer using the IPCC Tier 1 emission factor
//! 2. CH4 from livestock using a fixed per-head emission factor
//! 3. Converts both to CO2e with 100-year global warming potentials (AR4)

use crate::constants::{CH4_PER_HEAD, GWP_CH4, GWP_N2O, KG_PER_TONNE, N2O_EMISSION_FACTOR};
use rscarbon_core::records::BaselineInputs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Baseline emissions per hectare and year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaselineResult {
    /// unit: kg N2O-N / ha / yr
    pub n2o_n_kg: f64,
    /// unit: t CO2e / ha / yr
    pub n2o_co2e: f64,
    /// unit: kg CH4 / ha / yr
    pub ch4_kg: f64,
    /// unit: t CO2e / ha / yr
    pub ch4_co2e: f64,
    /// unit: t CO2e / ha / yr
    pub total_co2e: f64,
}

/// Fertilizer N2O and livestock CH4 emission estimator
///
/// $$N2O\text{-}N = F_N \cdot EF_1 \qquad CO2e_{N2O} = N2O\text{-}N \cdot GWP_{N2O} / 1000$$
///
/// $$CH4 = n \cdot EF_{CH4} \qquad CO2e_{CH4} = CH4 \cdot GWP_{CH4} / 1000$$
///
/// CH4 is only counted when livestock is present and the head count is positive.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BaselineEmissions;

impl BaselineEmissions {
    pub fn new() -> Self {
        Self
    }

    /// N2O-N emitted from applied fertilizer (kg N2O-N / ha)
    pub fn n2o_n(&self, fertilizer_n: f64) -> f64 {
        fertilizer_n * N2O_EMISSION_FACTOR
    }

    /// CH4 emitted by livestock (kg CH4 / ha)
    pub fn ch4(&self, livestock_present: bool, livestock_count: u32) -> f64 {
        if livestock_present && livestock_count > 0 {
            livestock_count as f64 * CH4_PER_HEAD
        } else {
            0.0
        }
    }

    pub fn estimate(&self, inputs: &BaselineInputs) -> BaselineResult {
        let n2o_n_kg = self.n2o_n(inputs.fertilizer_n);
        let n2o_co2e = n2o_n_kg * GWP_N2O / KG_PER_TONNE;

        let ch4_kg = self.ch4(inputs.livestock_present, inputs.livestock_count);
        let ch4_co2e = ch4_kg * GWP_CH4 / KG_PER_TONNE;

        let total_co2e = n2o_co2e + ch4_co2e;
        debug!(n2o_co2e, ch4_co2e, total_co2e, "Estimated baseline emissions");

        BaselineResult {
            n2o_n_kg,
            n2o_co2e,
            ch4_kg,
            ch4_co2e,
            total_co2e,
        }
    }
}
