//! Net GHG Benefit Orchestrator
//!
//! Composes the soil carbon, turnover and baseline emission components into a
//! single project-level net greenhouse-gas benefit.
//!
//! # Stages
//!
//! Stages run in a fixed order and each feeds the next. The first failing stage
//! aborts the calculation and is reported as [`RSCarbonError::Computation`];
//! no partial result is returned.
//!
//! 1. SOC stock over all soil samples
//! 2. Soil turnover over the horizon, from the first soil sample
//! 3. Baseline emissions
//! 4. Project emissions
//! 5. Net benefit
//!
//! # Known Approximations
//!
//! - **Project emissions**: There is no separate project-scenario emissions model
//!   yet. Project emissions are taken to equal baseline emissions, so the
//!   avoided-emissions term is zero and the net benefit equals the soil carbon
//!   change in CO2e.
//! - **Representative sample**: Only the first soil sample drives the turnover
//!   simulation; variation between samples is not modelled.

use crate::baseline::{BaselineEmissions, BaselineResult};
use crate::constants::CO2_PER_C;
use crate::parameters::TurnoverParameters;
use crate::soc::{SocEstimate, SocStock};
use crate::turnover::{SoilTurnover, TurnoverResult};
use rscarbon_core::errors::{RSCarbonError, RSCarbonResult};
use rscarbon_core::records::ProjectPlot;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// A fallible stage of the net benefit calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SocStock,
    Turnover,
    Baseline,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::SocStock => "SOC stock estimate",
            Stage::Turnover => "soil turnover simulation",
            Stage::Baseline => "baseline emissions estimate",
        };
        f.write_str(name)
    }
}

/// Results of the individual components, kept for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentResults {
    pub soc: SocEstimate,
    pub turnover: TurnoverResult,
    pub baseline: BaselineResult,
}

/// Project-level net GHG benefit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetBenefitResult {
    pub plot_id: String,
    /// Average stock over all samples
    /// unit: t C / ha
    pub initial_soc: f64,
    /// unit: t C / ha
    pub soc_change: f64,
    /// unit: t CO2e / ha
    pub soc_change_co2e: f64,
    /// unit: t CO2e / ha / yr
    pub baseline_emissions: f64,
    /// unit: t CO2e / ha / yr
    pub project_emissions: f64,
    /// unit: t CO2e / ha
    pub net_benefit: f64,
    pub components: ComponentResults,
}

/// Net GHG benefit accounting formula
///
/// $$B_{net} = (E_{baseline} - E_{project}) + \Delta SOC_{CO2e}$$
pub fn net_benefit(
    baseline_emissions: f64,
    project_emissions: f64,
    soc_change_co2e: f64,
) -> f64 {
    (baseline_emissions - project_emissions) + soc_change_co2e
}

/// Project-scenario emissions (t CO2e / ha / yr)
///
/// Equal to the baseline until a project emissions model exists.
pub fn project_emissions(baseline: &BaselineResult) -> f64 {
    baseline.total_co2e
}

/// Orchestrates a net benefit calculation for one project plot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetBenefitCalculator {
    soc: SocStock,
    turnover: SoilTurnover,
    baseline: BaselineEmissions,
}

impl NetBenefitCalculator {
    pub fn new() -> Self {
        Self::from_parameters(TurnoverParameters::default())
    }

    pub fn from_parameters(turnover: TurnoverParameters) -> Self {
        Self {
            soc: SocStock::new(),
            turnover: SoilTurnover::from_parameters(turnover),
            baseline: BaselineEmissions::new(),
        }
    }

    fn soc_stage(&self, plot: &ProjectPlot) -> RSCarbonResult<SocEstimate> {
        Ok(self.soc.estimate(&plot.soil_samples))
    }

    fn turnover_stage(&self, plot: &ProjectPlot) -> RSCarbonResult<TurnoverResult> {
        let representative = plot
            .soil_samples
            .first()
            .ok_or_else(|| RSCarbonError::EmptyInput("representative soil sample".to_string()))?;
        Ok(self.turnover.simulate(
            &plot.climate_records,
            representative,
            &plot.management_records,
            plot.horizon_years,
        ))
    }

    fn baseline_stage(&self, plot: &ProjectPlot) -> RSCarbonResult<BaselineResult> {
        Ok(self.baseline.estimate(&plot.baseline))
    }

    /// Run all stages for `plot`
    pub fn calculate(&self, plot: &ProjectPlot) -> RSCarbonResult<NetBenefitResult> {
        info!(
            plot_id = %plot.plot_id,
            horizon_years = plot.horizon_years,
            "Calculating net GHG benefit"
        );

        let soc = self
            .soc_stage(plot)
            .map_err(|e| RSCarbonError::during(Stage::SocStock, e))?;
        let turnover = self
            .turnover_stage(plot)
            .map_err(|e| RSCarbonError::during(Stage::Turnover, e))?;
        let baseline = self
            .baseline_stage(plot)
            .map_err(|e| RSCarbonError::during(Stage::Baseline, e))?;

        let baseline_emissions = baseline.total_co2e;
        let project_emissions = project_emissions(&baseline);
        debug!(
            baseline_emissions,
            project_emissions, "Project emissions taken equal to baseline"
        );

        let soc_change = turnover.total_change;
        let soc_change_co2e = soc_change * CO2_PER_C;
        let net_benefit = net_benefit(baseline_emissions, project_emissions, soc_change_co2e);

        info!(plot_id = %plot.plot_id, net_benefit, "Calculated net GHG benefit");

        Ok(NetBenefitResult {
            plot_id: plot.plot_id.clone(),
            initial_soc: soc.average,
            soc_change,
            soc_change_co2e,
            baseline_emissions,
            project_emissions,
            net_benefit,
            components: ComponentResults {
                soc,
                turnover,
                baseline,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rscarbon_core::records::{BaselineInputs, ClimateRecord, ManagementRecord, SoilSample};

    fn sample(carbon_concentration: f64) -> SoilSample {
        SoilSample {
            bulk_density: 1.2,
            depth: 30.0,
            carbon_concentration,
            clay_content: 25.0,
        }
    }

    fn plot() -> ProjectPlot {
        let climate_records = (2024..2027)
            .flat_map(|year| {
                (1..=12).map(move |month| ClimateRecord {
                    year,
                    month,
                    mean_temperature: 14.0 + month as f64,
                    total_rainfall: 80.0,
                    evaporation: 45.0,
                })
            })
            .collect();
        let management_records = (1..=12)
            .map(|month| ManagementRecord {
                carbon_input: 0.5,
                ..ManagementRecord::empty(2024, month)
            })
            .collect();

        ProjectPlot {
            plot_id: "plot-7".to_string(),
            soil_samples: vec![sample(2.0), sample(1.0)],
            climate_records,
            management_records,
            baseline: BaselineInputs {
                fertilizer_n: 120.0,
                livestock_present: true,
                livestock_count: 4,
            },
            horizon_years: 3,
        }
    }

    #[test]
    fn test_net_benefit_formula() {
        assert_relative_eq!(net_benefit(2.0, 0.5, 1.0), 2.5, epsilon = 1e-12);
        assert_relative_eq!(net_benefit(0.3, 0.3, -4.0), -4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_net_benefit_collapses_to_soc_change() {
        let result = NetBenefitCalculator::new().calculate(&plot()).unwrap();

        assert_eq!(result.baseline_emissions, result.project_emissions);
        assert_relative_eq!(
            result.net_benefit,
            result.soc_change * 44.0 / 12.0,
            max_relative = 1e-12
        );
        assert_eq!(result.net_benefit, result.soc_change_co2e);
    }

    #[test]
    fn test_initial_soc_is_average_of_all_samples() {
        let result = NetBenefitCalculator::new().calculate(&plot()).unwrap();
        assert_relative_eq!(result.initial_soc, 5400.0, epsilon = 1e-9);
        // The turnover simulation starts from the first sample only
        assert_relative_eq!(result.components.turnover.initial_soc, 7200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_components_are_kept() {
        let p = plot();
        let result = NetBenefitCalculator::new().calculate(&p).unwrap();

        let turnover = SoilTurnover::new().simulate(
            &p.climate_records,
            &p.soil_samples[0],
            &p.management_records,
            p.horizon_years,
        );
        assert_eq!(result.components.turnover, turnover);
        assert_eq!(result.soc_change, turnover.total_change);
        assert_eq!(result.components.soc.per_sample.len(), 2);
        assert_relative_eq!(result.baseline_emissions, 0.12 * 0.298 * 10.0 + 5.0, epsilon = 1e-9);
        assert_eq!(result.plot_id, "plot-7");
    }

    #[test]
    fn test_missing_representative_sample_aborts() {
        let mut p = plot();
        p.soil_samples.clear();

        match NetBenefitCalculator::new().calculate(&p) {
            Err(RSCarbonError::Computation { step, message }) => {
                assert_eq!(step, "soil turnover simulation");
                assert!(message.contains("representative soil sample"));
            }
            other => panic!("Expected computation error, got {other:?}"),
        }
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::SocStock.to_string(), "SOC stock estimate");
        assert_eq!(Stage::Baseline.to_string(), "baseline emissions estimate");
    }
}
