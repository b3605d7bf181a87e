//! Fixed scientific constants
//!
//! Only the allometric coefficients in
//! [`BiomassParameters`](crate::parameters::BiomassParameters) can be overridden.
//! Everything here is fixed by the accounting methodology.

/// Mass of CO2 per unit mass of carbon (44 / 12)
pub const CO2_PER_C: f64 = 44.0 / 12.0;

/// unit: kg / t
pub const KG_PER_TONNE: f64 = 1000.0;

/// Converts depth (cm) x bulk density (g / cm^3) x concentration (%) into t C / ha
pub const SOC_STOCK_UNIT_FACTOR: f64 = 100.0;

// Allometric defaults (agroforestry biomass)

/// Allometric scaling coefficient
pub const DEFAULT_ALLOMETRIC_A: f64 = 0.0673;
/// Allometric exponent on stem diameter
pub const DEFAULT_ALLOMETRIC_B: f64 = 2.84;
/// Belowground to aboveground biomass ratio
pub const DEFAULT_ROOT_SHOOT_RATIO: f64 = 0.24;
/// Carbon content of dry biomass
pub const DEFAULT_CARBON_FRACTION: f64 = 0.47;
/// Rounded CO2 / C ratio used by the agroforestry equation
pub const DEFAULT_CO2_CONVERSION: f64 = 3.67;

// Soil turnover

/// Base monthly decomposition rate of soil organic carbon
pub const BASE_DECOMPOSITION_RATE: f64 = 0.02;
/// Fractional change in decomposition per degree of temperature
/// unit: 1 / degC
pub const TEMPERATURE_SENSITIVITY: f64 = 0.1;
/// unit: degC
pub const REFERENCE_TEMPERATURE: f64 = 20.0;
/// Fractional change in decomposition per 100 mm of rainfall
pub const MOISTURE_SENSITIVITY: f64 = 0.05;
/// unit: mm
pub const REFERENCE_RAINFALL: f64 = 100.0;
pub const MONTHS_PER_YEAR: u32 = 12;
/// First calendar year of a turnover simulation unless configured otherwise
pub const DEFAULT_SIMULATION_START_YEAR: i32 = 2024;

// Baseline emissions

/// IPCC Tier 1 direct N2O emission factor
/// unit: kg N2O-N / kg N applied
pub const N2O_EMISSION_FACTOR: f64 = 0.01;
/// 100-year global warming potential of N2O
pub const GWP_N2O: f64 = 298.0;
/// Enteric and manure methane per animal
/// unit: kg CH4 / head / yr
pub const CH4_PER_HEAD: f64 = 50.0;
/// 100-year global warming potential of CH4
pub const GWP_CH4: f64 = 25.0;
