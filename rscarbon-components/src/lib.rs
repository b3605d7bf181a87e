//! Carbon accounting components for RSCarbon
//!
//! This crate provides the calculation components of a VM0042-style
//! soil organic carbon and agroforestry greenhouse-gas assessment.
//!
//! # Module Organisation
//!
//! - `biomass`: Allometric tree biomass and CO2e
//! - `soc`: Soil organic carbon stock from soil samples
//! - `turnover`: Simplified multi-year soil carbon turnover simulation
//! - `baseline`: Fertilizer N2O and livestock CH4 baseline emissions
//! - `net_benefit`: Orchestrates the above into a project-level net GHG benefit
//!
//! # Parameters
//!
//! Overridable parameters live in the `parameters` module and can be loaded from
//! TOML via [`config::CalculationConfig`]. Fixed methodology constants are in
//! `constants`.

pub mod baseline;
pub mod biomass;
pub mod config;
pub mod constants;
pub mod net_benefit;
pub mod parameters;
pub mod soc;
pub mod turnover;
