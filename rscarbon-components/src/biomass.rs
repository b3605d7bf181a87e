//! Allometric Biomass Component
//!
//! Estimates the carbon stored in agroforestry trees from stem diameters.
//!
//! # What This Component Does
//!
//! 1. Calculates aboveground biomass (AGB) for each tree from its diameter at
//!    breast height using a power-law allometric equation
//! 2. Adds belowground (root) biomass using a fixed root:shoot ratio
//! 3. Converts total biomass to carbon and then to CO2-equivalent
//!
//! # Units
//!
//! Per-tree and intermediate quantities are in kg. The headline figure,
//! `total_co2e_tonnes`, is in t CO2e.

use crate::constants::KG_PER_TONNE;
use crate::parameters::BiomassParameters;
use rscarbon_core::errors::{RSCarbonError, RSCarbonResult};
use rscarbon_core::records::TreeObservation;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Aboveground biomass of a single tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeBiomass {
    pub diameter_cm: f64,
    pub species: Option<String>,
    pub agb_kg: f64,
}

/// Plot-level biomass totals
///
/// All values in kg.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BiomassTotals {
    pub total_agb_kg: f64,
    pub belowground_biomass_kg: f64,
    pub total_biomass_kg: f64,
    pub total_carbon_kg: f64,
    pub total_co2e_kg: f64,
}

/// Result of a biomass estimate over a set of trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomassEstimate {
    pub per_tree: Vec<TreeBiomass>,
    pub totals: BiomassTotals,
    pub total_co2e_tonnes: f64,
}

impl BiomassEstimate {
    /// CO2-equivalent stock per hectare for a plot of the given area (ha)
    pub fn co2e_tonnes_per_ha(&self, plot_area_ha: f64) -> f64 {
        self.total_co2e_tonnes / plot_area_ha
    }
}

/// Allometric aboveground biomass estimator
///
/// $$AGB = a \cdot D^b$$
///
/// $$C_{total} = AGB_{total} \cdot (1 + R) \cdot f_C$$
///
/// $$CO2e = C_{total} \cdot k_{CO2}$$
///
/// Where:
/// - $D$ is the diameter at breast height (cm)
/// - $R$ is the root:shoot ratio
/// - $f_C$ is the carbon fraction of dry biomass
/// - $k_{CO2}$ is the carbon to CO2 conversion factor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllometricBiomass {
    parameters: BiomassParameters,
}

impl AllometricBiomass {
    /// Create a new biomass estimator with default coefficients
    pub fn new() -> Self {
        Self::from_parameters(BiomassParameters::default())
    }

    /// Create a new biomass estimator from parameters
    pub fn from_parameters(parameters: BiomassParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &BiomassParameters {
        &self.parameters
    }

    /// Aboveground biomass of one tree (kg)
    ///
    /// Fails with [`RSCarbonError::Domain`] if the diameter is not positive.
    pub fn tree_agb(&self, diameter_cm: f64) -> RSCarbonResult<f64> {
        if diameter_cm.is_nan() || diameter_cm <= 0.0 {
            return Err(RSCarbonError::Domain {
                quantity: "diameter_cm".to_string(),
                value: diameter_cm,
            });
        }
        Ok(self.parameters.a * diameter_cm.powf(self.parameters.b))
    }

    /// Carry a total aboveground biomass through to carbon and CO2e
    pub fn totals(&self, total_agb_kg: f64) -> BiomassTotals {
        let belowground_biomass_kg = total_agb_kg * self.parameters.root_shoot_ratio;
        let total_biomass_kg = total_agb_kg + belowground_biomass_kg;
        let total_carbon_kg = total_biomass_kg * self.parameters.carbon_fraction;
        let total_co2e_kg = total_carbon_kg * self.parameters.co2_conversion;

        BiomassTotals {
            total_agb_kg,
            belowground_biomass_kg,
            total_biomass_kg,
            total_carbon_kg,
            total_co2e_kg,
        }
    }

    /// Estimate per-tree and plot-level biomass
    ///
    /// An empty set of trees gives zero totals.
    pub fn estimate(&self, trees: &[TreeObservation]) -> RSCarbonResult<BiomassEstimate> {
        if trees.is_empty() {
            warn!("No trees supplied to biomass estimate; reporting zero biomass");
        }

        let per_tree = trees
            .iter()
            .map(|tree| {
                Ok(TreeBiomass {
                    diameter_cm: tree.diameter_cm,
                    species: tree.species.clone(),
                    agb_kg: self.tree_agb(tree.diameter_cm)?,
                })
            })
            .collect::<RSCarbonResult<Vec<_>>>()?;

        let total_agb_kg: f64 = per_tree.iter().map(|t| t.agb_kg).sum();
        let totals = self.totals(total_agb_kg);
        let total_co2e_tonnes = totals.total_co2e_kg / KG_PER_TONNE;

        debug!(
            trees = per_tree.len(),
            total_agb_kg, total_co2e_tonnes, "Estimated plot biomass"
        );

        Ok(BiomassEstimate {
            per_tree,
            totals,
            total_co2e_tonnes,
        })
    }
}
