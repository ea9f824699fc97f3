use serde::{Deserialize, Serialize};

/// Output of a completed simulation. Never partially filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Simulated paths, `iteration_count` rows of `horizon_days + 1` prices.
    pub paths: Vec<Vec<f64>>,
    /// Cross-sectional mean at each time index.
    pub mean_path: Vec<f64>,
    /// Nearest-rank 5th percentile at each time index.
    pub p5_path: Vec<f64>,
    /// Nearest-rank 95th percentile at each time index.
    pub p95_path: Vec<f64>,
    pub terminal_mean: f64,
    pub terminal_min: f64,
    pub terminal_max: f64,
    /// Value-at-Risk at 95% in currency units, always non-negative.
    pub var_95_amount: f64,
    /// 5th percentile simple return in percent, sign preserved.
    pub var_95_percent: f64,
}

impl SimulationResult {
    /// Number of simulated paths.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of simulated days.
    #[must_use]
    pub fn horizon_days(&self) -> usize {
        self.mean_path.len().saturating_sub(1)
    }
}
