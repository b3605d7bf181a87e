//! Range validation for inbound records
//!
//! Components assume their inputs are physically meaningful. Every record is
//! checked here before a calculation is started and the first violation is
//! reported as [`RSCarbonError::Validation`].

use crate::errors::{RSCarbonError, RSCarbonResult};
use crate::records::{
    BaselineInputs, ClimateRecord, ManagementRecord, MonthKey, ProjectPlot, SoilSample,
    TreeObservation,
};
use std::collections::HashSet;
use std::ops::{Bound, RangeBounds};

/// Maximum simulation horizon
/// unit: years
pub const MAX_HORIZON_YEARS: u32 = 50;

/// Accepted calendar years for climate and management records
pub const YEAR_RANGE: (i32, i32) = (2000, 2030);

/// A closed, open or half-open interval of accepted values
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    lower: Bound<f64>,
    upper: Bound<f64>,
}

impl Interval {
    /// `lower < x <= upper`
    pub const fn left_open(lower: f64, upper: f64) -> Self {
        Self {
            lower: Bound::Excluded(lower),
            upper: Bound::Included(upper),
        }
    }

    /// `lower <= x <= upper`
    pub const fn closed(lower: f64, upper: f64) -> Self {
        Self {
            lower: Bound::Included(lower),
            upper: Bound::Included(upper),
        }
    }

    /// `x > 0`
    pub const fn positive() -> Self {
        Self {
            lower: Bound::Excluded(0.0),
            upper: Bound::Unbounded,
        }
    }

    /// `x >= 0`
    pub const fn non_negative() -> Self {
        Self {
            lower: Bound::Included(0.0),
            upper: Bound::Unbounded,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && (self.lower, self.upper).contains(&value)
    }

    /// Check a value, reporting `field` on failure
    pub fn check(&self, field: &str, value: f64) -> RSCarbonResult<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(RSCarbonError::validation(field, value, self.describe()))
        }
    }

    fn describe(&self) -> String {
        let lower = match self.lower {
            Bound::Included(v) => format!("{v} <= "),
            Bound::Excluded(v) => format!("{v} < "),
            Bound::Unbounded => String::new(),
        };
        let upper = match self.upper {
            Bound::Included(v) => format!(" <= {v}"),
            Bound::Excluded(v) => format!(" < {v}"),
            Bound::Unbounded => String::new(),
        };
        format!("{lower}x{upper}")
    }
}

pub const TREE_DIAMETER: Interval = Interval::positive();
pub const BULK_DENSITY: Interval = Interval::left_open(0.5, 2.0);
pub const SOIL_DEPTH: Interval = Interval::left_open(10.0, 100.0);
pub const CARBON_CONCENTRATION: Interval = Interval::left_open(0.1, 10.0);
pub const CLAY_CONTENT: Interval = Interval::left_open(0.0, 100.0);
pub const MEAN_TEMPERATURE: Interval = Interval::closed(-50.0, 60.0);
pub const TOTAL_RAINFALL: Interval = Interval::closed(0.0, 2000.0);
pub const EVAPORATION: Interval = Interval::closed(0.0, 500.0);
pub const CARBON_INPUT: Interval = Interval::closed(0.0, 50.0);
pub const DPM_RPM_RATIO: Interval = Interval::closed(0.5, 3.0);
pub const MONTHLY_FERTILIZER_N: Interval = Interval::closed(0.0, 500.0);
pub const ANNUAL_FERTILIZER_N: Interval = Interval::non_negative();

/// A record that can check its own physical ranges
pub trait Validate {
    fn validate(&self) -> RSCarbonResult<()>;
}

/// Validate each item, prefixing failing field names with `name[index].`
pub fn validate_each<T: Validate>(name: &str, items: &[T]) -> RSCarbonResult<()> {
    for (i, item) in items.iter().enumerate() {
        item.validate()
            .map_err(|e| prefix_field(&format!("{name}[{i}]"), e))?;
    }
    Ok(())
}

/// Check a simulation horizon lies in `1..=MAX_HORIZON_YEARS`
pub fn check_horizon(years: u32) -> RSCarbonResult<()> {
    if (1..=MAX_HORIZON_YEARS).contains(&years) {
        Ok(())
    } else {
        Err(RSCarbonError::validation(
            "horizon_years",
            years,
            format!("1 <= x <= {MAX_HORIZON_YEARS}"),
        ))
    }
}

fn check_month_key(key: MonthKey) -> RSCarbonResult<()> {
    if !(1..=12).contains(&key.month) {
        return Err(RSCarbonError::validation("month", key.month, "1 <= x <= 12"));
    }
    let (first, last) = YEAR_RANGE;
    if !(first..=last).contains(&key.year) {
        return Err(RSCarbonError::validation(
            "year",
            key.year,
            format!("{first} <= x <= {last}"),
        ));
    }
    Ok(())
}

/// Reject repeated `(year, month)` keys
pub fn check_unique_months(
    name: &str,
    keys: impl IntoIterator<Item = MonthKey>,
) -> RSCarbonResult<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(RSCarbonError::validation(
                name,
                key,
                "one record per (year, month)",
            ));
        }
    }
    Ok(())
}

impl Validate for TreeObservation {
    fn validate(&self) -> RSCarbonResult<()> {
        TREE_DIAMETER.check("diameter_cm", self.diameter_cm)
    }
}

impl Validate for SoilSample {
    fn validate(&self) -> RSCarbonResult<()> {
        BULK_DENSITY.check("bulk_density", self.bulk_density)?;
        SOIL_DEPTH.check("depth", self.depth)?;
        CARBON_CONCENTRATION.check("carbon_concentration", self.carbon_concentration)?;
        CLAY_CONTENT.check("clay_content", self.clay_content)
    }
}

impl Validate for ClimateRecord {
    fn validate(&self) -> RSCarbonResult<()> {
        check_month_key(self.key())?;
        MEAN_TEMPERATURE.check("mean_temperature", self.mean_temperature)?;
        TOTAL_RAINFALL.check("total_rainfall", self.total_rainfall)?;
        EVAPORATION.check("evaporation", self.evaporation)
    }
}

impl Validate for ManagementRecord {
    fn validate(&self) -> RSCarbonResult<()> {
        check_month_key(self.key())?;
        CARBON_INPUT.check("carbon_input", self.carbon_input)?;
        DPM_RPM_RATIO.check("dpm_rpm_ratio", self.dpm_rpm_ratio)?;
        MONTHLY_FERTILIZER_N.check("fertilizer_n", self.fertilizer_n)
    }
}

impl Validate for BaselineInputs {
    fn validate(&self) -> RSCarbonResult<()> {
        ANNUAL_FERTILIZER_N.check("fertilizer_n", self.fertilizer_n)
    }
}

impl Validate for ProjectPlot {
    fn validate(&self) -> RSCarbonResult<()> {
        if self.soil_samples.is_empty() {
            return Err(RSCarbonError::validation(
                "soil_samples",
                "[]",
                "at least one sample",
            ));
        }
        if self.climate_records.is_empty() {
            return Err(RSCarbonError::validation(
                "climate_records",
                "[]",
                "at least one record",
            ));
        }
        validate_each("soil_samples", &self.soil_samples)?;
        validate_each("climate_records", &self.climate_records)?;
        validate_each("management_records", &self.management_records)?;
        check_unique_months(
            "climate_records",
            self.climate_records.iter().map(ClimateRecord::key),
        )?;
        check_unique_months(
            "management_records",
            self.management_records.iter().map(ManagementRecord::key),
        )?;
        self.baseline
            .validate()
            .map_err(|e| prefix_field("baseline", e))?;
        check_horizon(self.horizon_years)
    }
}

/// Qualify the field of a validation error with its parent, e.g. `baseline.fertilizer_n`
pub fn prefix_field(prefix: &str, error: RSCarbonError) -> RSCarbonError {
    match error {
        RSCarbonError::Validation {
            field,
            value,
            constraint,
        } => RSCarbonError::Validation {
            field: format!("{prefix}.{field}"),
            value,
            constraint,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SoilSample {
        SoilSample {
            bulk_density: 1.2,
            depth: 30.0,
            carbon_concentration: 2.0,
            clay_content: 25.0,
        }
    }

    fn climate(year: i32, month: u32) -> ClimateRecord {
        ClimateRecord {
            year,
            month,
            mean_temperature: 20.0,
            total_rainfall: 100.0,
            evaporation: 50.0,
        }
    }

    fn plot() -> ProjectPlot {
        ProjectPlot {
            plot_id: "plot-1".to_string(),
            soil_samples: vec![sample()],
            climate_records: vec![climate(2024, 1), climate(2024, 2)],
            management_records: vec![ManagementRecord::empty(2024, 1)],
            baseline: BaselineInputs::default(),
            horizon_years: 10,
        }
    }

    #[test]
    fn test_interval_bounds() {
        assert!(!BULK_DENSITY.contains(0.5));
        assert!(BULK_DENSITY.contains(0.51));
        assert!(BULK_DENSITY.contains(2.0));
        assert!(!BULK_DENSITY.contains(2.01));
        assert!(!BULK_DENSITY.contains(f64::NAN));
        assert!(MEAN_TEMPERATURE.contains(-50.0));
        assert!(!TREE_DIAMETER.contains(0.0));
        assert!(!TREE_DIAMETER.contains(f64::INFINITY));
    }

    #[test]
    fn test_interval_description() {
        assert_eq!(BULK_DENSITY.describe(), "0.5 < x <= 2");
        assert_eq!(MEAN_TEMPERATURE.describe(), "-50 <= x <= 60");
        assert_eq!(TREE_DIAMETER.describe(), "0 < x");
        assert_eq!(ANNUAL_FERTILIZER_N.describe(), "0 <= x");
    }

    #[test]
    fn test_valid_sample_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_each_sample_field_checked() {
        let cases = [
            (SoilSample { bulk_density: 0.5, ..sample() }, "bulk_density"),
            (SoilSample { depth: 10.0, ..sample() }, "depth"),
            (SoilSample { carbon_concentration: 10.5, ..sample() }, "carbon_concentration"),
            (SoilSample { clay_content: 0.0, ..sample() }, "clay_content"),
        ];
        for (sample, expected) in cases {
            match sample.validate() {
                Err(RSCarbonError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("Expected validation error for {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_climate_month_out_of_range() {
        let err = climate(2024, 13).validate().unwrap_err();
        assert!(matches!(err, RSCarbonError::Validation { ref field, .. } if field == "month"));
    }

    #[test]
    fn test_validate_each_prefixes_index() {
        let samples = vec![sample(), SoilSample { depth: 150.0, ..sample() }];
        match validate_each("soil_samples", &samples) {
            Err(RSCarbonError::Validation { field, .. }) => {
                assert_eq!(field, "soil_samples[1].depth")
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_plot_valid() {
        assert!(plot().validate().is_ok());
    }

    #[test]
    fn test_plot_requires_samples_and_climate() {
        let mut p = plot();
        p.soil_samples.clear();
        assert!(p.validate().is_err());

        let mut p = plot();
        p.climate_records.clear();
        assert!(p.validate().is_err());

        // Management data is optional; missing months use defaults
        let mut p = plot();
        p.management_records.clear();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_plot_rejects_duplicate_months() {
        let mut p = plot();
        p.climate_records.push(climate(2024, 1));
        match p.validate() {
            Err(RSCarbonError::Validation { field, value, .. }) => {
                assert_eq!(field, "climate_records");
                assert_eq!(value, "2024-01");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_horizon_bounds() {
        assert!(check_horizon(0).is_err());
        assert!(check_horizon(1).is_ok());
        assert!(check_horizon(MAX_HORIZON_YEARS).is_ok());
        assert!(check_horizon(MAX_HORIZON_YEARS + 1).is_err());
    }

    #[test]
    fn test_baseline_field_prefixed() {
        let mut p = plot();
        p.baseline.fertilizer_n = -1.0;
        match p.validate() {
            Err(RSCarbonError::Validation { field, .. }) => {
                assert_eq!(field, "baseline.fertilizer_n")
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }
}
