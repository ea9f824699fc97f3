//! Request and response bodies.

use mc_var_domain::{SimulationParameters, SimulationResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /simulate`.
///
/// Fields are optional so a missing value is reported with the same message as
/// an out-of-range one instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SimulationRequest {
    /// Starting price, must be positive.
    #[schema(example = 100.0)]
    pub initial_price: Option<f64>,
    /// Annual volatility in percent, 0 to 200.
    #[schema(example = 20.0)]
    pub annual_volatility: Option<f64>,
    /// Trading days to simulate, 1 to 365.
    #[schema(example = 30)]
    pub horizon_days: Option<f64>,
    /// Number of paths, 100 to 10000.
    #[schema(example = 1000)]
    pub iteration_count: Option<f64>,
}

impl SimulationRequest {
    /// Converts to engine parameters.
    ///
    /// Missing or non-integral values become sentinels that fail the matching
    /// validation check, so the engine reports errors in its usual order.
    #[must_use]
    pub fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters::new(
            self.initial_price.unwrap_or(f64::NAN),
            self.annual_volatility.unwrap_or(f64::NAN),
            whole_number(self.horizon_days),
            whole_number(self.iteration_count),
        )
    }
}

/// Integral value in `u32` range, or 0.
fn whole_number(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) => v as u32,
        _ => 0,
    }
}

/// Successful simulation body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimulationResponse {
    /// Paths × (horizon_days + 1) price matrix.
    pub simulations: Vec<Vec<f64>>,
    /// Mean price at each day.
    pub average: Vec<f64>,
    /// 5th percentile price at each day.
    pub percentile_5: Vec<f64>,
    /// 95th percentile price at each day.
    pub percentile_95: Vec<f64>,
    pub final_price_average: f64,
    pub final_price_minimum: f64,
    pub final_price_maximum: f64,
    /// 95% Value-at-Risk in currency units.
    pub var_95: f64,
    /// 5th percentile return in percent, signed.
    pub var_percentage: f64,
}

impl From<SimulationResult> for SimulationResponse {
    fn from(result: SimulationResult) -> Self {
        Self {
            simulations: result.paths,
            average: result.mean_path,
            percentile_5: result.p5_path,
            percentile_95: result.p95_path,
            final_price_average: result.terminal_mean,
            final_price_minimum: result.terminal_min,
            final_price_maximum: result.terminal_max,
            var_95: result.var_95_amount,
            var_percentage: result.var_95_percent,
        }
    }
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
