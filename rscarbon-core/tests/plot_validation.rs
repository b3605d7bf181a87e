//! Validation of whole project plots as they are deserialized from requests.

use rscarbon_core::errors::RSCarbonError;
use rscarbon_core::records::{ManagementRecord, ProjectPlot, DEFAULT_HORIZON_YEARS};
use rscarbon_core::validation::Validate;
use serde_json::json;

fn plot_json() -> serde_json::Value {
    json!({
        "plot_id": "north-field",
        "soil_samples": [
            {"bulk_density": 1.1, "depth": 20, "carbon_concentration": 3.2, "clay_content": 18}
        ],
        "climate_records": [
            {"year": 2024, "month": 1, "mean_temperature": -4.0, "total_rainfall": 30.0, "evaporation": 2.0},
            {"year": 2024, "month": 2, "mean_temperature": -1.5, "total_rainfall": 28.0, "evaporation": 4.0}
        ],
        "management_records": [
            {"year": 2024, "month": 2, "carbon_input": 0.2}
        ],
        "baseline": {"fertilizer_n": 60.0, "livestock_present": true, "livestock_count": 3}
    })
}

fn field_of(plot: &ProjectPlot) -> String {
    match plot.validate() {
        Err(RSCarbonError::Validation { field, .. }) => field,
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn test_valid_plot() {
    let plot: ProjectPlot = serde_json::from_value(plot_json()).unwrap();
    assert_eq!(plot.horizon_years, DEFAULT_HORIZON_YEARS);
    assert_eq!(plot.baseline.livestock_count, 3);
    plot.validate().unwrap();
}

#[test]
fn test_first_violation_is_reported() {
    let mut value = plot_json();
    value["climate_records"][1]["month"] = json!(13);
    value["management_records"][0]["dpm_rpm_ratio"] = json!(5.0);
    let plot: ProjectPlot = serde_json::from_value(value).unwrap();

    assert_eq!(field_of(&plot), "climate_records[1].month");
}

#[test]
fn test_nested_fields_are_qualified() {
    let mut value = plot_json();
    value["management_records"][0]["fertilizer_n"] = json!(650.0);
    let plot: ProjectPlot = serde_json::from_value(value).unwrap();
    assert_eq!(field_of(&plot), "management_records[0].fertilizer_n");

    let mut value = plot_json();
    value["baseline"]["fertilizer_n"] = json!(-10.0);
    let plot: ProjectPlot = serde_json::from_value(value).unwrap();
    assert_eq!(field_of(&plot), "baseline.fertilizer_n");
}

#[test]
fn test_duplicate_management_month() {
    let mut plot: ProjectPlot = serde_json::from_value(plot_json()).unwrap();
    plot.management_records.push(ManagementRecord {
        carbon_input: 0.4,
        ..ManagementRecord::empty(2024, 2)
    });
    assert_eq!(field_of(&plot), "management_records");
}

#[test]
fn test_years_outside_accepted_range() {
    for year in [1999, 2031] {
        let mut value = plot_json();
        value["climate_records"][0]["year"] = json!(year);
        let plot: ProjectPlot = serde_json::from_value(value).unwrap();
        assert_eq!(field_of(&plot), "climate_records[0].year");
    }
}
