//! Monte Carlo simulation engine.
//!
//! This crate turns validated [`SimulationParameters`] into a [`SimulationResult`]:
//! - Standard-normal draws via the Box-Muller transform
//! - Geometric Brownian Motion price paths, stepped one trading day at a time
//! - Cross-sectional statistics: mean path, percentile bands, terminal stats, VaR
//! - An orchestrating engine with structured logging and typed errors
//!
//! [`SimulationParameters`]: mc_var_domain::SimulationParameters
//! [`SimulationResult`]: mc_var_domain::SimulationResult

/// Prelude module for convenient imports.
pub mod prelude;

/// Error types.
pub mod error;
/// Engine orchestration and configuration.
pub mod monte_carlo;
/// GBM path generation.
pub mod price_path;
/// Standard-normal variate generation.
pub mod random;
/// Aggregation of completed path ensembles.
pub mod statistics;

pub use error::{ComputationError, SimulationError};
pub use monte_carlo::{EngineConfig, MonteCarloEngine, run_simulation};
