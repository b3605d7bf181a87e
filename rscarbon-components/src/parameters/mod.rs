//! Component parameters
//!
//! Each parameter struct provides defaults matching the VM0042 reference
//! configuration and can be overridden through [`crate::config::CalculationConfig`].

mod biomass;
mod turnover;

pub use biomass::BiomassParameters;
pub use turnover::TurnoverParameters;
