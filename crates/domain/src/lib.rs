//! Domain model for the Monte Carlo price-risk engine.
//!
//! This crate holds the types shared by the simulation engine and its callers:
//! - Simulation parameters and their validation rules
//! - The simulation result (paths, percentile bands, VaR)
//! - Fixed model constants (trading-day convention, zero drift)

/// Fixed model constants and parameter bounds.
pub mod constants;
/// Parameter validation.
pub mod validation;
/// Immutable input and output records.
pub mod value_objects;

pub use validation::{ValidationError, check_memory_budget, memory_footprint_bytes};
pub use value_objects::simulation_parameters::SimulationParameters;
pub use value_objects::simulation_result::SimulationResult;
