//! Soil Carbon Turnover Component
//!
//! A simplified, RothC-like simulation of how the soil organic carbon stock of a
//! plot evolves over several years at monthly resolution.
//!
//! # What This Component Does
//!
//! 1. Builds a table of monthly driving conditions keyed by `(year, month)`:
//!    - seeded from climate records (temperature, rainfall, evaporation)
//!    - overlaid with management records (carbon input, DPM:RPM ratio, cover,
//!      fertilizer); months without management use the defaults
//!
//! 2. Starts from the stock of a representative soil sample
//!
//! 3. For every simulated month, accumulates the carbon input and a
//!    climate-modified decomposition loss
//!
//! 4. Applies the net change once per year and records an annual trace
//!
//! # Differences from RothC
//!
//! This is not the validated RothC model:
//!
//! - **Single pool**: RothC splits carbon into DPM, RPM, BIO, HUM and IOM pools
//!   with separate rate constants. Here a single pool decays at one rate; the
//!   DPM:RPM ratio is carried in the monthly state but does not affect the rate.
//! - **Rate modifiers**: RothC uses a non-linear temperature function and a
//!   topsoil moisture deficit. Here both modifiers are linear in temperature and
//!   rainfall, and soil cover is not used.
//! - **Annual update**: The stock is updated once per year. Every month's
//!   decomposition is taken against the stock at the start of the year.
//! - **No stability guard**: Extreme inputs can drive the stock negative or make
//!   decomposition negative (below 10 degC). The trace is reported as is.

use crate::constants::{
    BASE_DECOMPOSITION_RATE, CO2_PER_C, MONTHS_PER_YEAR, MOISTURE_SENSITIVITY,
    REFERENCE_RAINFALL, REFERENCE_TEMPERATURE, TEMPERATURE_SENSITIVITY,
};
use crate::parameters::TurnoverParameters;
use crate::soc::SocStock;
use rscarbon_core::records::{
    ClimateRecord, ManagementRecord, MonthKey, SoilSample, DEFAULT_DPM_RPM_RATIO,
};
use rscarbon_core::validation::MAX_HORIZON_YEARS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Driving conditions for one simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyState {
    /// unit: degC
    pub temperature: f64,
    /// unit: mm
    pub rainfall: f64,
    /// unit: mm
    pub evaporation: f64,
    /// unit: t C / ha
    pub carbon_input: f64,
    pub dpm_rpm_ratio: f64,
    pub soil_cover: bool,
    /// unit: kg N / ha
    pub fertilizer_n: f64,
}

impl MonthlyState {
    /// Climate-only state with default management
    pub fn from_climate(record: &ClimateRecord) -> Self {
        Self {
            temperature: record.mean_temperature,
            rainfall: record.total_rainfall,
            evaporation: record.evaporation,
            carbon_input: 0.0,
            dpm_rpm_ratio: DEFAULT_DPM_RPM_RATIO,
            soil_cover: true,
            fertilizer_n: 0.0,
        }
    }

    /// Replace the management fields, keeping the climate fields
    pub fn with_management(self, record: &ManagementRecord) -> Self {
        Self {
            carbon_input: record.carbon_input,
            dpm_rpm_ratio: record.dpm_rpm_ratio,
            soil_cover: record.soil_cover,
            fertilizer_n: record.fertilizer_n,
            ..self
        }
    }
}

/// Monthly driving conditions keyed by `(year, month)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyStateTable {
    states: BTreeMap<MonthKey, MonthlyState>,
}

impl MonthlyStateTable {
    /// Seed the table from climate records, one entry per record
    pub fn seed(climate: &[ClimateRecord]) -> Self {
        let states = climate
            .iter()
            .map(|record| (record.key(), MonthlyState::from_climate(record)))
            .collect();
        Self { states }
    }

    /// Overlay management records onto months already in the table
    ///
    /// Management records for months without climate data are ignored.
    pub fn overlay(mut self, management: &[ManagementRecord]) -> Self {
        let mut ignored = 0;
        for record in management {
            match self.states.get_mut(&record.key()) {
                Some(state) => *state = state.with_management(record),
                None => {
                    debug!(month = %record.key(), "Management record has no climate month");
                    ignored += 1;
                }
            }
        }
        if ignored > 0 {
            warn!(
                ignored,
                "Ignoring management records without matching climate data"
            );
        }
        self
    }

    /// Seed from climate, then overlay management
    pub fn build(climate: &[ClimateRecord], management: &[ManagementRecord]) -> Self {
        Self::seed(climate).overlay(management)
    }

    pub fn get(&self, key: MonthKey) -> Option<&MonthlyState> {
        self.states.get(&key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// One year of the simulated trace
///
/// All values in t C / ha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualTurnover {
    pub year: i32,
    pub soc_start: f64,
    pub carbon_input: f64,
    pub decomposition: f64,
    pub soc_change: f64,
    pub soc_end: f64,
}

/// Result of a turnover simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverResult {
    /// unit: t C / ha
    pub initial_soc: f64,
    /// unit: t C / ha
    pub final_soc: f64,
    /// unit: t C / ha
    pub total_change: f64,
    /// Total change expressed as CO2-equivalent
    /// unit: t CO2e / ha
    pub change_co2e: f64,
    pub annual: Vec<AnnualTurnover>,
}

/// Temperature modifier of the decomposition rate
///
/// $$f_T = 1 + 0.1 (T - 20)$$
pub fn temperature_factor(temperature: f64) -> f64 {
    1.0 + TEMPERATURE_SENSITIVITY * (temperature - REFERENCE_TEMPERATURE)
}

/// Moisture modifier of the decomposition rate
///
/// $$f_W = 1 + 0.05 (P / 100 - 1)$$
pub fn moisture_factor(rainfall: f64) -> f64 {
    1.0 + MOISTURE_SENSITIVITY * (rainfall / REFERENCE_RAINFALL - 1.0)
}

/// Monthly fractional decomposition rate for the given conditions
pub fn decomposition_rate(state: &MonthlyState) -> f64 {
    BASE_DECOMPOSITION_RATE * temperature_factor(state.temperature) * moisture_factor(state.rainfall)
}

/// Multi-year soil carbon turnover simulator
///
/// For each simulated year $y$ with starting stock $S_y$:
///
/// $$I_y = \sum_m I_m \qquad D_y = \sum_m S_y \cdot k_m / 12$$
///
/// $$S_{y+1} = S_y + I_y - D_y$$
///
/// where $k_m$ is [`decomposition_rate`] for month $m$. Months absent from the
/// monthly table contribute neither input nor decomposition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoilTurnover {
    parameters: TurnoverParameters,
}

impl SoilTurnover {
    pub fn new() -> Self {
        Self::from_parameters(TurnoverParameters::default())
    }

    pub fn from_parameters(parameters: TurnoverParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &TurnoverParameters {
        &self.parameters
    }

    /// Simulate `years` years starting from the stock of `sample`
    pub fn simulate(
        &self,
        climate: &[ClimateRecord],
        sample: &SoilSample,
        management: &[ManagementRecord],
        years: u32,
    ) -> TurnoverResult {
        let table = MonthlyStateTable::build(climate, management);
        let initial_soc = SocStock::new().sample_stock(sample);
        self.run(&table, initial_soc, years)
    }

    /// Step a prepared monthly table forward from `initial_soc`
    ///
    /// Requests are limited to `MAX_HORIZON_YEARS` by validation. Longer
    /// horizons still run here, but the trace ends at `i32::MAX`.
    pub fn run(&self, table: &MonthlyStateTable, initial_soc: f64, years: u32) -> TurnoverResult {
        let mut current_soc = initial_soc;
        let mut annual = Vec::with_capacity(years.min(MAX_HORIZON_YEARS) as usize);
        let mut missing_months = 0;

        for offset in 0..years {
            let Some(year) = self.parameters.start_year.checked_add_unsigned(offset) else {
                warn!(
                    start_year = self.parameters.start_year,
                    years, "Simulation horizon passes the last representable year; trace truncated"
                );
                break;
            };
            let soc_start = current_soc;
            let mut carbon_input = 0.0;
            let mut decomposition = 0.0;

            for month in 1..=MONTHS_PER_YEAR {
                let Some(state) = table.get(MonthKey::new(year, month)) else {
                    missing_months += 1;
                    continue;
                };
                carbon_input += state.carbon_input;
                // current_soc is only updated at year end
                decomposition +=
                    current_soc * decomposition_rate(state) / MONTHS_PER_YEAR as f64;
            }

            let soc_change = carbon_input - decomposition;
            current_soc += soc_change;

            annual.push(AnnualTurnover {
                year,
                soc_start,
                carbon_input,
                decomposition,
                soc_change,
                soc_end: current_soc,
            });
        }

        if missing_months > 0 {
            warn!(
                missing_months,
                start_year = self.parameters.start_year,
                years,
                "Simulated months without climate data were skipped"
            );
        }

        let total_change = current_soc - initial_soc;
        debug!(initial_soc, final_soc = current_soc, total_change, "Simulated soil turnover");

        TurnoverResult {
            initial_soc,
            final_soc: current_soc,
            total_change,
            change_co2e: total_change * CO2_PER_C,
            annual,
        }
    }
}
