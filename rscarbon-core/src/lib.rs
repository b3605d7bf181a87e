//! Core types for VM0042-style greenhouse-gas accounting
//!
//! - [`records`]: field observation records shared by all components
//! - [`validation`]: physical range checks applied before any calculation
//! - [`errors`]: the error taxonomy used across the workspace

pub mod errors;
pub mod records;
pub mod validation;
