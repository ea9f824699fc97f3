//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use mc_var_simulation::prelude::*;
//! ```

// Domain types
pub use mc_var_domain::{SimulationParameters, SimulationResult, ValidationError};

// Engine
pub use crate::monte_carlo::{EngineConfig, MonteCarloEngine, run_simulation};

// Errors
pub use crate::error::{ComputationError, SimulationError};

// Price paths
pub use crate::price_path::{GeometricBrownianMotion, PathEnsemble};

// Random variates
pub use crate::random::{BoxMuller, NormalGenerator};

// Statistics
pub use crate::statistics::{
    CrossSectionStats, StatisticsAggregator, TerminalStats, ValueAtRisk, nearest_rank,
};
