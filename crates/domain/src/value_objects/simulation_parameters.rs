use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};

/// Inputs of a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Starting price of every path.
    pub initial_price: f64,
    /// Annualized volatility in percent (20.0 = 20%).
    pub annual_volatility: f64,
    /// Number of trading days to simulate.
    pub horizon_days: u32,
    /// Number of simulated paths.
    pub iteration_count: u32,
}

impl SimulationParameters {
    /// Creates a new parameter set. No validation is performed.
    #[must_use]
    pub fn new(
        initial_price: f64,
        annual_volatility: f64,
        horizon_days: u32,
        iteration_count: u32,
    ) -> Self {
        Self {
            initial_price,
            annual_volatility,
            horizon_days,
            iteration_count,
        }
    }

    /// Number of prices in each path, including the starting price.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.horizon_days as usize + 1
    }

    /// Checks every bound in order and returns the first violation.
    ///
    /// # Errors
    /// Returns the [`ValidationError`] of the first failing check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }
}
