//! Request/response operations
//!
//! Every operation validates its request against the physical ranges in
//! [`rscarbon_core::validation`] before any component runs. Components assume
//! valid input.
//!
//! Request fields are snake_case and also accept the camelCase names used by the
//! upstream field data API.

use rscarbon_components::baseline::{BaselineEmissions, BaselineResult};
use rscarbon_components::biomass::{AllometricBiomass, BiomassEstimate};
use rscarbon_components::config::CalculationConfig;
use rscarbon_components::net_benefit::{NetBenefitCalculator, NetBenefitResult};
use rscarbon_components::parameters::BiomassParameters;
use rscarbon_components::soc::{SocEstimate, SocStock};
use rscarbon_components::turnover::{SoilTurnover, TurnoverResult};
use rscarbon_core::errors::{RSCarbonError, RSCarbonResult};
use rscarbon_core::records::{
    BaselineInputs, ClimateRecord, ManagementRecord, ProjectPlot, SoilSample, TreeObservation,
    DEFAULT_HORIZON_YEARS,
};
use rscarbon_core::validation::{
    check_horizon, check_unique_months, prefix_field, validate_each, Interval, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const PLOT_AREA: Interval = Interval::positive();

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}

/// Allometric coefficients supplied alongside the trees of a biomass request
///
/// Each coefficient is optional; those left out keep the configured value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoefficientOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(default, alias = "rootShootRatio", skip_serializing_if = "Option::is_none")]
    pub root_shoot_ratio: Option<f64>,
    #[serde(default, alias = "carbonFraction", skip_serializing_if = "Option::is_none")]
    pub carbon_fraction: Option<f64>,
    #[serde(default, alias = "co2Conversion", skip_serializing_if = "Option::is_none")]
    pub co2_conversion: Option<f64>,
}

impl CoefficientOverrides {
    pub fn apply(&self, base: &BiomassParameters) -> BiomassParameters {
        BiomassParameters {
            a: self.a.unwrap_or(base.a),
            b: self.b.unwrap_or(base.b),
            root_shoot_ratio: self.root_shoot_ratio.unwrap_or(base.root_shoot_ratio),
            carbon_fraction: self.carbon_fraction.unwrap_or(base.carbon_fraction),
            co2_conversion: self.co2_conversion.unwrap_or(base.co2_conversion),
        }
    }
}

/// Trees of one plot, with the allometric coefficients as sibling keys:
///
/// ```json
/// {"trees": [{"dbh_cm": 10.0}], "plot_area_ha": 1.0, "a": 0.1, "b": 2.0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomassRequest {
    pub trees: Vec<TreeObservation>,
    #[serde(flatten)]
    pub coefficients: CoefficientOverrides,
    /// unit: ha
    #[serde(default, alias = "plotAreaHa")]
    pub plot_area_ha: Option<f64>,
}

impl BiomassRequest {
    pub fn new(trees: Vec<TreeObservation>) -> Self {
        Self {
            trees,
            coefficients: CoefficientOverrides::default(),
            plot_area_ha: None,
        }
    }
}

impl Validate for BiomassRequest {
    fn validate(&self) -> RSCarbonResult<()> {
        validate_each("trees", &self.trees)?;
        match self.plot_area_ha {
            Some(area) => PLOT_AREA.check("plot_area_ha", area),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomassResponse {
    #[serde(flatten)]
    pub estimate: BiomassEstimate,
    /// Only present when the request supplied a plot area
    /// unit: t CO2e / ha
    pub co2e_tonnes_per_ha: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocRequest {
    #[serde(alias = "soilSamples")]
    pub soil_samples: Vec<SoilSample>,
}

impl Validate for SocRequest {
    fn validate(&self) -> RSCarbonResult<()> {
        validate_each("soil_samples", &self.soil_samples)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverRequest {
    #[serde(alias = "climateData", alias = "climate_records")]
    pub climate: Vec<ClimateRecord>,
    #[serde(alias = "soilSample")]
    pub soil_sample: SoilSample,
    #[serde(default, alias = "managementData", alias = "management_records")]
    pub management: Vec<ManagementRecord>,
    #[serde(default = "default_horizon_years", alias = "simulationYears")]
    pub horizon_years: u32,
}

impl Validate for TurnoverRequest {
    fn validate(&self) -> RSCarbonResult<()> {
        if self.climate.is_empty() {
            return Err(RSCarbonError::validation(
                "climate",
                "[]",
                "at least one record",
            ));
        }
        validate_each("climate", &self.climate)?;
        validate_each("management", &self.management)?;
        check_unique_months("climate", self.climate.iter().map(ClimateRecord::key))?;
        check_unique_months(
            "management",
            self.management.iter().map(ManagementRecord::key),
        )?;
        self.soil_sample
            .validate()
            .map_err(|e| prefix_field("soil_sample", e))?;
        check_horizon(self.horizon_years)
    }
}

/// Liveness report. Performs no computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

pub fn health() -> HealthStatus {
    HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Entry point for all calculations
///
/// Holds the calculation configuration and nothing else, so one service can be
/// shared freely between threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationService {
    config: CalculationConfig,
}

impl CalculationService {
    pub fn new(config: CalculationConfig) -> Self {
        Self { config }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> RSCarbonResult<Self> {
        Ok(Self::new(CalculationConfig::from_toml_file(path)?))
    }

    pub fn config(&self) -> &CalculationConfig {
        &self.config
    }

    pub fn estimate_biomass(&self, request: &BiomassRequest) -> RSCarbonResult<BiomassResponse> {
        request.validate()?;

        let parameters = request.coefficients.apply(&self.config.biomass);
        parameters.validate()?;
        debug!(trees = request.trees.len(), ?parameters, "Biomass request");

        let estimate = AllometricBiomass::from_parameters(parameters).estimate(&request.trees)?;
        let co2e_tonnes_per_ha = request
            .plot_area_ha
            .map(|area| estimate.co2e_tonnes_per_ha(area));

        Ok(BiomassResponse {
            estimate,
            co2e_tonnes_per_ha,
        })
    }

    /// An empty sample list is accepted and reports an average of 0.
    pub fn estimate_soc(&self, request: &SocRequest) -> RSCarbonResult<SocEstimate> {
        request.validate()?;
        Ok(SocStock::new().estimate(&request.soil_samples))
    }

    pub fn simulate_turnover(&self, request: &TurnoverRequest) -> RSCarbonResult<TurnoverResult> {
        request.validate()?;
        let simulator = SoilTurnover::from_parameters(self.config.turnover.clone());
        Ok(simulator.simulate(
            &request.climate,
            &request.soil_sample,
            &request.management,
            request.horizon_years,
        ))
    }

    pub fn estimate_baseline(&self, request: &BaselineInputs) -> RSCarbonResult<BaselineResult> {
        request.validate()?;
        Ok(BaselineEmissions::new().estimate(request))
    }

    pub fn compute_net_benefit(&self, plot: &ProjectPlot) -> RSCarbonResult<NetBenefitResult> {
        plot.validate()?;
        NetBenefitCalculator::from_parameters(self.config.turnover.clone()).calculate(plot)
    }
}
