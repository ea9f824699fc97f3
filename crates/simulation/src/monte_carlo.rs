//! Engine orchestration: validate, simulate, aggregate.

use crate::error::{ComputationError, SimulationError};
use crate::price_path::GeometricBrownianMotion;
use crate::random::NormalGenerator;
use crate::statistics::StatisticsAggregator;
use mc_var_domain::{SimulationParameters, SimulationResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Configuration for the Monte Carlo engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Spread per-path stepping and per-day aggregation over rayon.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            parallel: true,
        }
    }
}

impl EngineConfig {
    /// Sets a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables rayon parallelism.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Stateless GBM Monte Carlo engine. Each call is independent.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    config: EngineConfig,
}

impl MonteCarloEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a simulation with a source chosen from the configured seed.
    ///
    /// # Errors
    /// [`SimulationError::Validation`] if `params` are rejected, or
    /// [`SimulationError::Computation`] on an internal fault.
    pub fn simulate(
        &self,
        params: &SimulationParameters,
    ) -> Result<SimulationResult, SimulationError> {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.simulate_with_rng(params, rng)
    }

    /// Runs a simulation drawing uniforms from `rng`.
    ///
    /// # Errors
    /// Same as [`MonteCarloEngine::simulate`].
    pub fn simulate_with_rng<R: Rng>(
        &self,
        params: &SimulationParameters,
        rng: R,
    ) -> Result<SimulationResult, SimulationError> {
        info!(
            initial_price = params.initial_price,
            annual_volatility = params.annual_volatility,
            horizon_days = params.horizon_days,
            iteration_count = params.iteration_count,
            "Starting simulation"
        );

        if let Err(err) = params.validate() {
            warn!(error = %err, "Simulation parameters rejected");
            return Err(err.into());
        }

        let started = Instant::now();
        match self.run(params, NormalGenerator::new(rng)) {
            Ok(result) => {
                info!(
                    terminal_mean = result.terminal_mean,
                    var_95 = result.var_95_amount,
                    var_percent = result.var_95_percent,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Simulation completed"
                );
                Ok(result)
            }
            Err(err) => {
                error!(error = %err, "Simulation failed");
                Err(err.into())
            }
        }
    }

    fn run<R: Rng>(
        &self,
        params: &SimulationParameters,
        mut generator: NormalGenerator<R>,
    ) -> Result<SimulationResult, ComputationError> {
        let ensemble = GeometricBrownianMotion::from_parameters(params)
            .with_parallel(self.config.parallel)
            .simulate(&mut generator)?;
        debug!(
            paths = ensemble.iteration_count(),
            steps = ensemble.horizon_days(),
            "Paths generated"
        );

        StatisticsAggregator::new(self.config.parallel).aggregate(ensemble, params.initial_price)
    }
}

/// Runs one simulation with the default engine.
///
/// # Errors
/// Same as [`MonteCarloEngine::simulate`].
pub fn run_simulation(params: &SimulationParameters) -> Result<SimulationResult, SimulationError> {
    MonteCarloEngine::default().simulate(params)
}
