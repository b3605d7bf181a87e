//! Greenhouse-gas accounting for land-management projects.
//!
//! The science lives in two workspace crates:
//!
//! - [`rscarbon_core`] holds the observation records, range validation and the
//!   error type
//! - [`rscarbon_components`] holds the biomass, soil carbon, turnover, baseline
//!   emission and net benefit components
//!
//! This crate exposes them as request/response operations through
//! [`api::CalculationService`], and optionally as a Python extension module
//! (`python` feature).

pub mod api;
#[cfg(feature = "python")]
pub mod python;
