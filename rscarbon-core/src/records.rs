//! Field observation records
//!
//! Immutable value records consumed by the calculation components. Records are
//! built from an inbound request, validated (see [`crate::validation`]), used by a
//! single calculation pass and then dropped.
//!
//! Field names are snake_case. The camelCase names used by the upstream field
//! data API (`bulkDensity`, `meanTemperature`, `carbonInputs`, ...) are accepted
//! as aliases when deserializing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default ratio of decomposable to resistant plant material
pub const DEFAULT_DPM_RPM_RATIO: f64 = 1.44;

/// Simulation horizon used when a request does not state one
/// unit: years
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

/// Calendar month key for monthly time series.
///
/// Ordered by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1 (January) to 12 (December)
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A single measured tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeObservation {
    /// Stem diameter at breast height
    /// unit: cm
    #[serde(alias = "dbh_cm", alias = "diameter_at_breast_height")]
    pub diameter_cm: f64,
    #[serde(default)]
    pub species: Option<String>,
}

impl TreeObservation {
    pub fn new(diameter_cm: f64) -> Self {
        Self {
            diameter_cm,
            species: None,
        }
    }

    pub fn with_species(self, species: impl Into<String>) -> Self {
        Self {
            species: Some(species.into()),
            ..self
        }
    }
}

/// A soil core sample
///
/// All four fields are needed to give a physically meaningful sample, although only
/// bulk density, depth and carbon concentration enter the stock calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    /// unit: g / cm^3
    #[serde(alias = "bulkDensity")]
    pub bulk_density: f64,
    /// Sampling depth
    /// unit: cm
    #[serde(alias = "soilDepth", alias = "soil_depth")]
    pub depth: f64,
    /// Organic carbon concentration
    /// unit: %
    #[serde(alias = "carbonConcentration")]
    pub carbon_concentration: f64,
    /// unit: %
    #[serde(alias = "clayContent")]
    pub clay_content: f64,
}

/// Monthly climate observations for a plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    pub year: i32,
    pub month: u32,
    /// unit: degC
    #[serde(alias = "meanTemperature")]
    pub mean_temperature: f64,
    /// unit: mm
    #[serde(alias = "totalRainfall")]
    pub total_rainfall: f64,
    /// unit: mm
    pub evaporation: f64,
}

impl ClimateRecord {
    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }
}

fn default_dpm_rpm_ratio() -> f64 {
    DEFAULT_DPM_RPM_RATIO
}

fn default_soil_cover() -> bool {
    true
}

/// Monthly management practices for a plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManagementRecord {
    pub year: i32,
    pub month: u32,
    /// unit: t C / ha
    #[serde(default, alias = "carbonInputs", alias = "carbon_inputs")]
    pub carbon_input: f64,
    #[serde(default = "default_dpm_rpm_ratio", alias = "dpmRpmRatio")]
    pub dpm_rpm_ratio: f64,
    /// Whether the soil is vegetated (true) or bare (false)
    #[serde(default = "default_soil_cover", alias = "soilCover")]
    pub soil_cover: bool,
    /// unit: kg N / ha
    #[serde(default, alias = "fertilizerN")]
    pub fertilizer_n: f64,
    #[serde(default, alias = "livestockPresent")]
    pub livestock_present: bool,
}

impl ManagementRecord {
    /// A management record carrying only the defaults for the given month.
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            carbon_input: 0.0,
            dpm_rpm_ratio: DEFAULT_DPM_RPM_RATIO,
            soil_cover: true,
            fertilizer_n: 0.0,
            livestock_present: false,
        }
    }

    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }
}

/// Baseline-scenario activity data used for emission estimates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BaselineInputs {
    /// Synthetic fertilizer application
    /// unit: kg N / ha / yr
    #[serde(default, alias = "fertilizerN")]
    pub fertilizer_n: f64,
    #[serde(default, alias = "livestockPresent")]
    pub livestock_present: bool,
    /// unit: head
    #[serde(default, alias = "livestockCount")]
    pub livestock_count: u32,
}

impl BaselineInputs {
    /// Reference baseline used when a project plot does not supply its own:
    /// 100 kg N / ha / yr of fertilizer and no livestock.
    pub fn reference_scenario() -> Self {
        Self {
            fertilizer_n: 100.0,
            livestock_present: false,
            livestock_count: 0,
        }
    }
}

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}

/// Everything needed for a project-level net benefit calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPlot {
    #[serde(alias = "plotId")]
    pub plot_id: String,
    #[serde(alias = "soilSamples")]
    pub soil_samples: Vec<SoilSample>,
    #[serde(alias = "climateData")]
    pub climate_records: Vec<ClimateRecord>,
    #[serde(default, alias = "managementData")]
    pub management_records: Vec<ManagementRecord>,
    #[serde(
        default = "BaselineInputs::reference_scenario",
        alias = "baselineEmissions",
        alias = "baseline_inputs"
    )]
    pub baseline: BaselineInputs,
    #[serde(default = "default_horizon_years", alias = "simulationYears")]
    pub horizon_years: u32,
}
