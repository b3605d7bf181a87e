//! Soil Organic Carbon Stock Component
//!
//! Converts soil core measurements into an organic carbon stock per hectare:
//!
//! $$SOC = 100 \cdot \rho_b \cdot d \cdot C$$
//!
//! Where:
//! - $\rho_b$ is bulk density (g / cm^3)
//! - $d$ is sampling depth (cm)
//! - $C$ is organic carbon concentration (%)
//! - $SOC$ is the stock in t C / ha

use crate::constants::{CO2_PER_C, SOC_STOCK_UNIT_FACTOR};
use rscarbon_core::records::SoilSample;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Stock for one soil sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStock {
    pub sample: SoilSample,
    /// unit: t C / ha
    pub soc_stock: f64,
}

/// Result of a stock estimate over a set of samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocEstimate {
    pub per_sample: Vec<SampleStock>,
    /// Sum of per-sample stocks
    /// unit: t C / ha
    pub total: f64,
    /// Arithmetic mean of per-sample stocks
    /// unit: t C / ha
    pub average: f64,
    /// Average stock expressed as CO2-equivalent
    /// unit: t CO2e / ha
    pub average_co2e: f64,
}

/// Soil organic carbon stock estimator
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SocStock;

impl SocStock {
    pub fn new() -> Self {
        Self
    }

    /// Stock for a single sample (t C / ha)
    pub fn sample_stock(&self, sample: &SoilSample) -> f64 {
        SOC_STOCK_UNIT_FACTOR * sample.bulk_density * sample.depth * sample.carbon_concentration
    }

    /// Per-sample stocks, their sum and their mean
    ///
    /// The mean of an empty set is reported as 0. This keeps the estimator total
    /// but is not a meaningful accounting result; callers reject empty input
    /// before getting here.
    pub fn estimate(&self, samples: &[SoilSample]) -> SocEstimate {
        let per_sample: Vec<SampleStock> = samples
            .iter()
            .map(|sample| SampleStock {
                sample: *sample,
                soc_stock: self.sample_stock(sample),
            })
            .collect();

        let total: f64 = per_sample.iter().map(|s| s.soc_stock).sum();
        let average = if per_sample.is_empty() {
            warn!("No soil samples supplied to SOC estimate; reporting zero stock");
            0.0
        } else {
            total / per_sample.len() as f64
        };

        debug!(samples = per_sample.len(), total, average, "Estimated SOC stock");

        SocEstimate {
            per_sample,
            total,
            average,
            average_co2e: average * CO2_PER_C,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> SoilSample {
        SoilSample {
            bulk_density: 1.2,
            depth: 30.0,
            carbon_concentration: 2.0,
            clay_content: 25.0,
        }
    }

    #[test]
    fn test_reference_sample_stock() {
        let stock = SocStock::new().sample_stock(&sample());
        assert_relative_eq!(stock, 7200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stock_is_linear_in_each_factor() {
        let estimator = SocStock::new();
        let base = estimator.sample_stock(&sample());
        let k = 1.5;

        let scaled = [
            SoilSample { bulk_density: 1.2 * k, ..sample() },
            SoilSample { depth: 30.0 * k, ..sample() },
            SoilSample { carbon_concentration: 2.0 * k, ..sample() },
        ];
        for s in scaled {
            assert_relative_eq!(estimator.sample_stock(&s), base * k, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_clay_does_not_affect_stock() {
        let estimator = SocStock::new();
        let sandy = SoilSample { clay_content: 5.0, ..sample() };
        assert_eq!(estimator.sample_stock(&sandy), estimator.sample_stock(&sample()));
    }

    #[test]
    fn test_average_over_samples() {
        let samples = [
            sample(),
            SoilSample { carbon_concentration: 1.0, ..sample() },
        ];
        let estimate = SocStock::new().estimate(&samples);

        assert_eq!(estimate.per_sample.len(), 2);
        assert_relative_eq!(estimate.total, 10800.0, epsilon = 1e-9);
        assert_relative_eq!(estimate.average, 5400.0, epsilon = 1e-9);
        assert_relative_eq!(estimate.average_co2e, 5400.0 * 44.0 / 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_samples_average_zero() {
        let estimate = SocStock::new().estimate(&[]);
        assert!(estimate.per_sample.is_empty());
        assert_eq!(estimate.total, 0.0);
        assert_eq!(estimate.average, 0.0);
        assert_eq!(estimate.average_co2e, 0.0);
    }
}
